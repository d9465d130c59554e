//! Configuration types for the PHY layer
//!
//! Link parameter enums shared by every PHY driver, and the builder-style
//! [`Rk630Config`] consumed by [`Rk630`](crate::phy::Rk630).

use crate::hal::fuse::FuseCell;
use crate::phy::generic::{LinkStatus, PhyCapabilities};
use crate::phy::rk630::TxLevel;

// =============================================================================
// Timing Constants
// =============================================================================

/// Auto-negotiation completion timeout in milliseconds
pub const AN_TIMEOUT_MS: u32 = 4_000;

/// Interval between BMSR polls while waiting for auto-negotiation
pub const AN_POLL_INTERVAL_MS: u32 = 50;

/// Soft reset polling attempts before giving up
pub const RESET_MAX_ATTEMPTS: u32 = 1_000;

// =============================================================================
// Link Parameters
// =============================================================================

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// 10 Mbps
    #[default]
    Mbps10,
    /// 100 Mbps
    Mbps100,
}

impl Speed {
    /// Speed in Mbit/s
    pub const fn mbps(self) -> u32 {
        match self {
            Speed::Mbps10 => 10,
            Speed::Mbps100 => 100,
        }
    }
}

/// Ethernet duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    #[default]
    Half,
    /// Full duplex
    Full,
}

// =============================================================================
// RK630 Configuration
// =============================================================================

/// RK630 PHY configuration
///
/// ```ignore
/// let config = Rk630Config::new()
///     .with_tx_level_cell(FuseCell::new(0x3c, 2))
///     .with_an_timeout_ms(2_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rk630Config {
    /// Use auto-negotiation (otherwise force `forced_link`)
    pub autoneg: bool,
    /// Link parameters used when auto-negotiation is off
    pub forced_link: LinkStatus,
    /// Abilities to advertise
    pub advertise: PhyCapabilities,
    /// Auto-negotiation wait in `startup`
    pub an_timeout_ms: u32,
    /// Fuse cell holding the T22 TX levels (`macphy-txlevel`)
    pub tx_level_cell: Option<FuseCell>,
    /// TX levels used when the fuse lookup fails
    pub default_tx_level: TxLevel,
}

impl Default for Rk630Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Rk630Config {
    /// Auto-negotiation on, basic 10/100 abilities, built-in TX levels
    pub const fn new() -> Self {
        Self {
            autoneg: true,
            forced_link: LinkStatus::fast_full(),
            advertise: PhyCapabilities::basic_10_100(),
            an_timeout_ms: AN_TIMEOUT_MS,
            tx_level_cell: None,
            default_tx_level: TxLevel::DEFAULT,
        }
    }

    /// Disable auto-negotiation and force the given link
    #[must_use]
    pub const fn with_forced_link(mut self, link: LinkStatus) -> Self {
        self.autoneg = false;
        self.forced_link = link;
        self
    }

    /// Set the advertised abilities
    #[must_use]
    pub const fn with_advertise(mut self, caps: PhyCapabilities) -> Self {
        self.advertise = caps;
        self
    }

    /// Set the auto-negotiation timeout
    #[must_use]
    pub const fn with_an_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.an_timeout_ms = timeout_ms;
        self
    }

    /// Set the fuse cell the T22 TX levels are read from
    #[must_use]
    pub const fn with_tx_level_cell(mut self, cell: FuseCell) -> Self {
        self.tx_level_cell = Some(cell);
        self
    }

    /// Override the fallback TX levels
    #[must_use]
    pub const fn with_default_tx_level(mut self, level: TxLevel) -> Self {
        self.default_tx_level = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Rk630Config::default();
        assert!(config.autoneg);
        assert_eq!(config.an_timeout_ms, 4_000);
        assert_eq!(config.tx_level_cell, None);
        assert_eq!(config.default_tx_level, TxLevel::new(0x2d, 0x32));
        assert!(!config.advertise.pause);
    }

    #[test]
    fn forced_link_disables_autoneg() {
        let config = Rk630Config::new().with_forced_link(LinkStatus::slow_half());
        assert!(!config.autoneg);
        assert_eq!(config.forced_link, LinkStatus::slow_half());
    }

    #[test]
    fn speed_mbps() {
        assert_eq!(Speed::Mbps10.mbps(), 10);
        assert_eq!(Speed::Mbps100.mbps(), 100);
    }
}
