//! Hardware Abstraction Layer
//!
//! The seams between the drivers and the platform:
//!
//! - [`mdio`]: MDIO bus trait plus paged and indirect MMD helpers
//! - [`fuse`]: Efuse/OTP read access and calibration cell descriptions
//! - [`regs`]: Bounded 32-bit register windows with Rockchip hiword writes
//!
//! # Delay Integration
//!
//! Types that need to wait use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL.

pub mod fuse;
pub mod mdio;
pub mod regs;

pub use fuse::{FuseCell, FuseReader, NoFuse};
pub use mdio::MdioBus;
pub use regs::{Mmio, RegisterBlock, RegisterIo};
