//! Ethernet PHY Drivers
//!
//! This module provides a generic PHY driver trait, the generic
//! auto-negotiation/link handling shared by chip drivers, and the RK630
//! driver.
//!
//! # Architecture
//!
//! The PHY layer is independent of any MAC implementation and communicates
//! only through the [`MdioBus`](crate::hal::MdioBus) trait. This allows:
//!
//! - Reuse across different MAC controllers
//! - Testing with mock MDIO implementations
//!
//! # Supported PHY Chips
//!
//! - [`Rk630`]: Rockchip RK630 / RV1106 integrated macphy
//!
//! # Bring-up Order
//!
//! 1. [`Rk630::probe`] - match the PHY ID on the bus
//! 2. [`Rk630::config`] - analog front-end recipe, then auto-negotiation
//! 3. [`Rk630::startup`] - wait for the link and resolve speed/duplex

pub mod generic;
pub mod rk630;

pub use generic::{LinkStatus, PhyCapabilities, PhyDescriptor, PhyDriver, PhyState};
pub use rk630::{Rk630, Rk630Variant, TxLevel};

pub use crate::config::Rk630Config;

/// PHY drivers known to this crate
pub const PHY_DRIVERS: &[PhyDescriptor] = &[Rk630::DESCRIPTOR];

/// Find the driver descriptor for a probed PHY ID
pub fn find_driver(phy_id: u32) -> Option<&'static PhyDescriptor> {
    PHY_DRIVERS.iter().find(|desc| desc.matches(phy_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_driver_by_id() {
        assert_eq!(find_driver(0x0044_1400).map(|d| d.name), Some("Rockchip RK630"));
        assert!(find_driver(0x0007_C0F1).is_none());
    }
}
