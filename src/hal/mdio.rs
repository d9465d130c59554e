//! MDIO (Management Data Input/Output) HAL
//!
//! This module defines the bus seam PHY drivers talk through, plus the two
//! access patterns layered on top of plain Clause 22 reads and writes:
//!
//! - **Paged access**: the vendor register window at 0x10-0x1E is switched
//!   by writing `page << 8` to register 0x1F.
//! - **Indirect MMD access**: Clause 45 registers reached through the
//!   Clause 22 registers 13 and 14.

use crate::error::{ConfigError, Result};
use crate::internal::phy_registers::{mmd_ctrl, phy_reg};
use crate::internal::rk630_regs::reg;

// =============================================================================
// MDIO Constants
// =============================================================================

/// Maximum valid PHY address (5-bit field)
pub const MAX_PHY_ADDR: u8 = 31;

/// Page select register
pub const PAGE_SELECT_REG: u8 = reg::PAGE_SEL;

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for MDIO bus operations
///
/// This trait can be implemented by different backends (a MAC's SMI block,
/// a bit-banged GPIO pair, a test double), allowing the PHY drivers to stay
/// independent of the controller.
pub trait MdioBus {
    /// Read a PHY register
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()>;

    /// Check if the MDIO bus is busy
    fn is_busy(&self) -> bool;
}

impl<M: MdioBus + ?Sized> MdioBus for &mut M {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        (**self).read(phy_addr, reg_addr)
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        (**self).write(phy_addr, reg_addr, value)
    }

    fn is_busy(&self) -> bool {
        (**self).is_busy()
    }
}

/// Validate a PHY address against the 5-bit MDIO field
pub const fn check_phy_addr(phy_addr: u8) -> core::result::Result<(), ConfigError> {
    if phy_addr > MAX_PHY_ADDR {
        Err(ConfigError::InvalidPhyAddress)
    } else {
        Ok(())
    }
}

/// Read-modify-write a PHY register
///
/// Bits in `clear` are cleared before bits in `set` are applied.
pub fn modify<M: MdioBus>(
    mdio: &mut M,
    phy_addr: u8,
    reg_addr: u8,
    clear: u16,
    set: u16,
) -> Result<()> {
    let value = mdio.read(phy_addr, reg_addr)?;
    mdio.write(phy_addr, reg_addr, (value & !clear) | set)
}

// =============================================================================
// Paged Access
// =============================================================================

/// Encode a page index for the page select register
#[inline(always)]
pub const fn page_select_value(page: u8) -> u16 {
    (page as u16) << 8
}

/// Switch the vendor register window to `page`
pub fn select_page<M: MdioBus>(mdio: &mut M, phy_addr: u8, page: u8) -> Result<()> {
    mdio.write(phy_addr, PAGE_SELECT_REG, page_select_value(page))
}

/// Select `page` and write `(register, value)` pairs in order
///
/// The page is left selected; callers return to page 0 once their whole
/// sequence is done.
pub fn write_paged<M: MdioBus>(
    mdio: &mut M,
    phy_addr: u8,
    page: u8,
    writes: &[(u8, u16)],
) -> Result<()> {
    select_page(mdio, phy_addr, page)?;
    for &(reg_addr, value) in writes {
        mdio.write(phy_addr, reg_addr, value)?;
    }
    Ok(())
}

/// Read one register from `page`, then return to page 0
pub fn read_paged<M: MdioBus>(mdio: &mut M, phy_addr: u8, page: u8, reg_addr: u8) -> Result<u16> {
    select_page(mdio, phy_addr, page)?;
    let value = mdio.read(phy_addr, reg_addr);
    select_page(mdio, phy_addr, 0)?;
    value
}

// =============================================================================
// Indirect MMD Access (Clause 45 over Clause 22)
// =============================================================================

fn mmd_set_address<M: MdioBus>(mdio: &mut M, phy_addr: u8, devad: u8, reg_addr: u16) -> Result<()> {
    let devad = devad as u16 & mmd_ctrl::DEVAD_MASK;
    mdio.write(phy_addr, phy_reg::MMD_CTRL, mmd_ctrl::FUNC_ADDR | devad)?;
    mdio.write(phy_addr, phy_reg::MMD_DATA, reg_addr)?;
    mdio.write(phy_addr, phy_reg::MMD_CTRL, mmd_ctrl::FUNC_DATA | devad)
}

/// Write an MMD register through registers 13/14
pub fn mmd_write<M: MdioBus>(
    mdio: &mut M,
    phy_addr: u8,
    devad: u8,
    reg_addr: u16,
    value: u16,
) -> Result<()> {
    mmd_set_address(mdio, phy_addr, devad, reg_addr)?;
    mdio.write(phy_addr, phy_reg::MMD_DATA, value)
}

/// Read an MMD register through registers 13/14
pub fn mmd_read<M: MdioBus>(mdio: &mut M, phy_addr: u8, devad: u8, reg_addr: u16) -> Result<u16> {
    mmd_set_address(mdio, phy_addr, devad, reg_addr)?;
    mdio.read(phy_addr, phy_reg::MMD_DATA)
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;

    use super::*;
    use crate::testing::MockMdioBus;

    #[test]
    fn page_select_encoding() {
        assert_eq!(page_select_value(0), 0x0000);
        assert_eq!(page_select_value(1), 0x0100);
        assert_eq!(page_select_value(6), 0x0600);
        assert_eq!(page_select_value(8), 0x0800);
    }

    #[test]
    fn write_paged_selects_page_first() {
        let mut mdio = MockMdioBus::new();
        write_paged(&mut mdio, 2, 6, &[(0x10, 0x5540), (0x12, 0x0400)]).unwrap();

        assert_eq!(
            mdio.get_writes(),
            vec![(2, 0x1F, 0x0600), (2, 0x10, 0x5540), (2, 0x12, 0x0400)]
        );
    }

    #[test]
    fn read_paged_restores_page_zero() {
        let mut mdio = MockMdioBus::new();
        mdio.set_register(1, 0x18, 0x00bc);

        assert_eq!(read_paged(&mut mdio, 1, 8, 0x18).unwrap(), 0x00bc);
        assert_eq!(mdio.get_writes(), vec![(1, 0x1F, 0x0800), (1, 0x1F, 0x0000)]);
    }

    #[test]
    fn mmd_write_sequence() {
        let mut mdio = MockMdioBus::new();
        mmd_write(&mut mdio, 2, 7, 0x003c, 0x0000).unwrap();

        assert_eq!(
            mdio.get_writes(),
            vec![
                (2, 0x0D, 0x0007),
                (2, 0x0E, 0x003c),
                (2, 0x0D, 0x4007),
                (2, 0x0E, 0x0000),
            ]
        );
    }

    #[test]
    fn mmd_read_sets_address_then_reads_data() {
        let mut mdio = MockMdioBus::new();

        let value = mmd_read(&mut mdio, 2, 7, 0x003c).unwrap();
        assert_eq!(Some(value), mdio.get_register(2, 0x0E));
        assert_eq!(
            mdio.get_writes(),
            vec![(2, 0x0D, 0x0007), (2, 0x0E, 0x003c), (2, 0x0D, 0x4007)]
        );
        assert_eq!(mdio.read_count(2, 0x0E), 1);
    }

    #[test]
    fn modify_clears_then_sets() {
        let mut mdio = MockMdioBus::new();
        mdio.set_register(1, 0, 0x3100);
        modify(&mut mdio, 1, 0, 1 << 13, 0).unwrap();
        assert_eq!(mdio.get_register(1, 0), Some(0x1100));
    }

    #[test]
    fn phy_addr_range() {
        assert!(check_phy_addr(0).is_ok());
        assert!(check_phy_addr(31).is_ok());
        assert_eq!(check_phy_addr(32), Err(ConfigError::InvalidPhyAddress));
    }
}
