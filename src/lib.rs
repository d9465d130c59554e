//! Rockchip Boot Drivers
//!
//! A `no_std`, `no_alloc` Rust implementation of two small Rockchip
//! bootloader drivers:
//!
//! - the RK3528 system controller (GRF) binding, which exposes the SoC's
//!   general register file as a shared, bounds-checked register window
//! - the RK630 integrated Fast Ethernet PHY, including its analog front-end
//!   bring-up and efuse TX-level calibration
//!
//! # Architecture
//!
//! The crate is organized into three layers:
//!
//! 1. **Syscon Layer** ([`syscon`]): compatible matching, child binding and
//!    a registry of probed register blocks
//! 2. **PHY Layer** ([`phy`]): generic IEEE 802.3 link handling and the
//!    [`Rk630`] driver
//! 3. **HAL Layer** ([`hal`]): MDIO bus, efuse reader and 32-bit register
//!    access traits
//!
//! Nothing here touches hardware directly. Boards supply implementations of
//! [`MdioBus`](hal::MdioBus), [`FuseReader`](hal::FuseReader),
//! [`RegisterIo`](hal::RegisterIo) and [`DeviceNode`](syscon::DeviceNode).
//!
//! # Features
//!
//! - `rk3528` (default): RK3528 syscon compatible table
//! - `of-platdata`: Device data is compiled in; syscons do not bind children
//! - `defmt`: Enable defmt formatting and log output
//! - `log`: Enable `log` output
//!
//! # Example
//!
//! ```ignore
//! use rk_boot_drivers::{FuseCell, Rk630, Rk630Config};
//!
//! let config = Rk630Config::new().with_tx_level_cell(FuseCell::new(0x3c, 2));
//!
//! let Some(mut phy) = Rk630::probe(&mut mdio, 2, config)? else {
//!     return Err(ConfigError::NoMatch.into());
//! };
//! phy.config(&mut mdio, &mut efuse)?;
//!
//! if let Some(link) = phy.startup(&mut mdio, &mut delay)? {
//!     gmac.set_speed(link.speed);
//!     gmac.set_duplex(link.duplex);
//! }
//! ```

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod config;
pub mod error;
pub mod hal;
pub mod phy;
pub mod syscon;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{Duplex, Rk630Config, Speed};
pub use error::{
    CalibrationError, CalibrationResult, ConfigError, ConfigResult, Error, IoError, IoResult,
    Result,
};
pub use hal::{FuseCell, FuseReader, MdioBus, NoFuse, RegisterBlock, RegisterIo};
pub use phy::{LinkStatus, PhyCapabilities, PhyDriver, Rk630, Rk630Variant, TxLevel};
pub use syscon::{DeviceNode, Syscon, SysconDriver, SysconKind, SysconRegistry};

#[cfg(feature = "rk3528")]
#[cfg_attr(docsrs, doc(cfg(feature = "rk3528")))]
pub use syscon::rk3528::RK3528_SYSCON;
