//! Error types for the RK3528 syscon and RK630 PHY drivers
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Device matching, binding and configuration failures
//! - [`IoError`]: MDIO bus and register access failures
//! - [`CalibrationError`]: Efuse/OTP calibration lookup failures
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods. [`Error::errno`] maps it back onto the negative
//! errno convention the surrounding bootloader framework expects.

/// Invalid argument
pub const EINVAL: i32 = 22;
/// I/O error
pub const EIO: i32 = 5;
/// Connection timed out
pub const ETIMEDOUT: i32 = 110;
/// No such device
pub const ENODEV: i32 = 19;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and device matching errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Invalid PHY address (must be 0-31)
    InvalidPhyAddress,
    /// PHY address does not select a known chip variant
    UnsupportedAddress,
    /// No entry in the match table fits the device
    NoMatch,
    /// Required device-tree node is missing
    MissingNode,
    /// `reg` property is missing or malformed
    InvalidRegProperty,
    /// Register offset out of range or misaligned
    InvalidOffset,
    /// Fixed-capacity registry has no free slot
    RegistryFull,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidPhyAddress => "invalid PHY address",
            ConfigError::UnsupportedAddress => "unsupported address for current phy",
            ConfigError::NoMatch => "no matching device id",
            ConfigError::MissingNode => "device node missing",
            ConfigError::InvalidRegProperty => "invalid reg property",
            ConfigError::InvalidOffset => "register offset out of range",
            ConfigError::RegistryFull => "registry full",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Bus and register access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Operation timed out
    Timeout,
    /// MDIO transaction failed
    BusError,
    /// PHY did not respond or returned garbage
    PhyError,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Timeout => "operation timed out",
            IoError::BusError => "MDIO bus error",
            IoError::PhyError => "PHY communication error",
        }
    }
}

// =============================================================================
// Calibration Errors
// =============================================================================

/// Efuse/OTP calibration lookup errors
///
/// These never abort PHY bring-up on their own; the RK630 driver falls back
/// to its built-in TX levels when any of them occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// No efuse/OTP device present
    DeviceNotFound,
    /// Calibration cell not described for this board
    MissingCell,
    /// Calibration cell too short for the requested data
    InvalidCell,
    /// Reading the fuse array failed
    ReadFailed,
}

impl core::fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CalibrationError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CalibrationError::DeviceNotFound => "could not find efuse/otp device",
            CalibrationError::MissingCell => "calibration cell not found",
            CalibrationError::InvalidCell => "calibration cell too short",
            CalibrationError::ReadFailed => "read from efuse/otp failed",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// ```ignore
/// match phy.config(&mut mdio, &mut otp) {
///     Err(Error::Config(ConfigError::UnsupportedAddress)) => { /* ... */ }
///     Err(Error::Io(IoError::Timeout)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
    /// Calibration error
    Calibration(CalibrationError),
}

impl Error {
    /// Negative errno value for the bootloader framework
    #[must_use]
    pub const fn errno(&self) -> i32 {
        match self {
            Error::Config(_)
            | Error::Calibration(CalibrationError::MissingCell | CalibrationError::InvalidCell) => {
                -EINVAL
            }
            Error::Calibration(CalibrationError::DeviceNotFound) => -ENODEV,
            Error::Calibration(CalibrationError::ReadFailed)
            | Error::Io(IoError::BusError | IoError::PhyError) => -EIO,
            Error::Io(IoError::Timeout) => -ETIMEDOUT,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
            Error::Calibration(e) => write!(f, "calibration: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

impl From<CalibrationError> for Error {
    fn from(e: CalibrationError) -> Self {
        Error::Calibration(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

/// Result type alias for calibration lookups
pub type CalibrationResult<T> = core::result::Result<T, CalibrationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn config_error_as_str_non_empty() {
        let variants = [
            ConfigError::InvalidPhyAddress,
            ConfigError::UnsupportedAddress,
            ConfigError::NoMatch,
            ConfigError::MissingNode,
            ConfigError::InvalidRegProperty,
            ConfigError::InvalidOffset,
            ConfigError::RegistryFull,
        ];

        for variant in variants {
            assert!(!variant.as_str().is_empty(), "ConfigError::{variant:?} has empty string");
        }
    }

    #[test]
    fn calibration_error_display() {
        let err = CalibrationError::DeviceNotFound;
        assert_eq!(format!("{err}"), "could not find efuse/otp device");
    }

    #[test]
    fn error_display_prefixes_domain() {
        let err: Error = ConfigError::UnsupportedAddress.into();
        let display = format!("{err}");
        assert!(display.starts_with("config:"));
        assert!(display.contains("unsupported address"));

        let err: Error = IoError::Timeout.into();
        assert!(format!("{err}").starts_with("io:"));
    }

    #[test]
    fn errno_mapping() {
        assert_eq!(Error::from(ConfigError::UnsupportedAddress).errno(), -22);
        assert_eq!(Error::from(ConfigError::MissingNode).errno(), -EINVAL);
        assert_eq!(Error::from(IoError::Timeout).errno(), -ETIMEDOUT);
        assert_eq!(Error::from(IoError::BusError).errno(), -EIO);
        assert_eq!(Error::from(CalibrationError::DeviceNotFound).errno(), -ENODEV);
        assert_eq!(Error::from(CalibrationError::MissingCell).errno(), -EINVAL);
        assert_eq!(Error::from(CalibrationError::InvalidCell).errno(), -EINVAL);
        assert_eq!(Error::from(CalibrationError::ReadFailed).errno(), -EIO);
    }

    #[test]
    fn error_from_calibration_error() {
        let err: Error = CalibrationError::ReadFailed.into();
        match err {
            Error::Calibration(e) => assert_eq!(e, CalibrationError::ReadFailed),
            _ => panic!("Expected Error::Calibration"),
        }
    }
}
