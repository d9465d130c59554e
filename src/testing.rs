//! Testing utilities and mock implementations
//!
//! Host-side doubles for the bus, fuse, register and device-tree seams.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::collections::HashMap;
use std::vec::Vec;

use crate::error::{CalibrationError, CalibrationResult, Result};
use crate::hal::fuse::FuseReader;
use crate::hal::mdio::MdioBus;
use crate::hal::regs::RegisterIo;
use crate::syscon::DeviceNode;

use crate::internal::phy_registers::{anar, bmsr, phy_reg};

// =============================================================================
// Mock MDIO Bus
// =============================================================================

/// Mock MDIO bus for testing PHY drivers without hardware
///
/// This allows setting up expected register values and verifying writes.
///
/// # Example
///
/// ```ignore
/// let mut mdio = MockMdioBus::new();
/// mdio.set_register(2, 0x01, 0x786D); // Set BMSR with link up
///
/// assert!(ieee802_3::is_link_up(&mut mdio, 2).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct MockMdioBus {
    /// Register values: (phy_addr, reg_addr) -> value
    registers: RefCell<HashMap<(u8, u8), u16>>,
    /// Record of writes: (phy_addr, reg_addr, value)
    write_log: RefCell<Vec<(u8, u8, u16)>>,
    /// Read counts: (phy_addr, reg_addr) -> reads
    reads: RefCell<HashMap<(u8, u8), usize>>,
    /// Whether the bus should report as busy
    busy: RefCell<bool>,
}

impl MockMdioBus {
    /// Create a new mock MDIO bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register value
    pub fn set_register(&self, phy_addr: u8, reg_addr: u8, value: u16) {
        self.registers
            .borrow_mut()
            .insert((phy_addr, reg_addr), value);
    }

    /// Get the current value of a register (for test verification)
    pub fn get_register(&self, phy_addr: u8, reg_addr: u8) -> Option<u16> {
        self.registers.borrow().get(&(phy_addr, reg_addr)).copied()
    }

    /// Get all writes that have been made
    pub fn get_writes(&self) -> Vec<(u8, u8, u16)> {
        self.write_log.borrow().clone()
    }

    /// Number of reads of one register
    pub fn read_count(&self, phy_addr: u8, reg_addr: u8) -> usize {
        self.reads
            .borrow()
            .get(&(phy_addr, reg_addr))
            .copied()
            .unwrap_or(0)
    }

    /// Set the busy flag
    pub fn set_busy(&self, busy: bool) {
        *self.busy.borrow_mut() = busy;
    }

    /// Setup for an RK630 PHY with reset-default register values
    pub fn setup_rk630(&self, phy_addr: u8) {
        self.set_register(phy_addr, phy_reg::PHYIDR1, 0x0044);
        self.set_register(phy_addr, phy_reg::PHYIDR2, 0x1400);

        // BMSR: 10/100 capabilities, link down initially
        let bmsr_value = bmsr::TX_FD_CAPABLE
            | bmsr::TX_HD_CAPABLE
            | bmsr::T10_FD_CAPABLE
            | bmsr::T10_HD_CAPABLE
            | bmsr::AN_ABILITY
            | bmsr::EXT_CAPABLE;
        self.set_register(phy_addr, phy_reg::BMSR, bmsr_value);

        // BMCR: auto-neg enabled
        self.set_register(phy_addr, phy_reg::BMCR, 0x1000);

        // ANAR: advertise all capabilities
        self.set_register(phy_addr, phy_reg::ANAR, 0x01E1);

        self.set_register(phy_addr, phy_reg::ANLPAR, 0x0000);
    }

    /// Simulate link coming up with 100 Mbps Full Duplex
    pub fn simulate_link_up_100_fd(&self, phy_addr: u8) {
        let mut bmsr_val = self.get_register(phy_addr, phy_reg::BMSR).unwrap_or(0);
        bmsr_val |= bmsr::LINK_STATUS | bmsr::AN_COMPLETE;
        self.set_register(phy_addr, phy_reg::BMSR, bmsr_val);

        let anlpar_val = anar::SELECTOR_IEEE802_3
            | anar::TX_FD
            | anar::TX_HD
            | anar::T10_FD
            | anar::T10_HD;
        self.set_register(phy_addr, phy_reg::ANLPAR, anlpar_val);
    }

    /// Simulate link coming up with 10 Mbps Half Duplex
    pub fn simulate_link_up_10_hd(&self, phy_addr: u8) {
        let mut bmsr_val = self.get_register(phy_addr, phy_reg::BMSR).unwrap_or(0);
        bmsr_val |= bmsr::LINK_STATUS | bmsr::AN_COMPLETE;
        self.set_register(phy_addr, phy_reg::BMSR, bmsr_val);

        // Partner only supports 10 Mbps HD
        let anlpar_val = anar::SELECTOR_IEEE802_3 | anar::T10_HD;
        self.set_register(phy_addr, phy_reg::ANLPAR, anlpar_val);
    }

    /// Simulate link going down
    pub fn simulate_link_down(&self, phy_addr: u8) {
        let mut bmsr_val = self.get_register(phy_addr, phy_reg::BMSR).unwrap_or(0);
        bmsr_val &= !(bmsr::LINK_STATUS | bmsr::AN_COMPLETE);
        self.set_register(phy_addr, phy_reg::BMSR, bmsr_val);
        self.set_register(phy_addr, phy_reg::ANLPAR, 0x0000);
    }
}

impl MdioBus for MockMdioBus {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        *self
            .reads
            .borrow_mut()
            .entry((phy_addr, reg_addr))
            .or_insert(0) += 1;

        // Return from register map (default 0 if not set)
        Ok(self
            .registers
            .borrow()
            .get(&(phy_addr, reg_addr))
            .copied()
            .unwrap_or(0))
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        self.write_log
            .borrow_mut()
            .push((phy_addr, reg_addr, value));

        self.registers
            .borrow_mut()
            .insert((phy_addr, reg_addr), value);

        Ok(())
    }

    fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total milliseconds that were "delayed"
    pub fn total_ms(&self) -> u64 {
        self.total_ns() / 1_000_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += u64::from(ns);
    }
}

// =============================================================================
// Mock Fuse
// =============================================================================

/// Mock efuse/OTP array; unset bytes read as zero
#[derive(Debug, Default)]
pub struct MockFuse {
    bytes: HashMap<u32, u8>,
    fail: bool,
    reads: usize,
}

impl MockFuse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Program bytes starting at `offset`
    pub fn set_bytes(&mut self, offset: u32, data: &[u8]) {
        for (off, byte) in (offset..).zip(data) {
            self.bytes.insert(off, *byte);
        }
    }

    /// Make every read fail
    pub fn set_fail(&mut self, fail: bool) {
        self.fail = fail;
    }

    /// Number of read calls
    pub fn read_calls(&self) -> usize {
        self.reads
    }
}

impl FuseReader for MockFuse {
    fn read(&mut self, offset: u32, buf: &mut [u8]) -> CalibrationResult<()> {
        self.reads += 1;
        if self.fail {
            return Err(CalibrationError::ReadFailed);
        }
        for (off, byte) in (offset..).zip(buf.iter_mut()) {
            *byte = self.bytes.get(&off).copied().unwrap_or(0);
        }
        Ok(())
    }
}

// =============================================================================
// Mock Registers
// =============================================================================

/// Mock 32-bit register space
#[derive(Debug, Default)]
pub struct MockRegisters {
    values: HashMap<usize, u32>,
    write_log: Vec<(usize, u32)>,
}

impl MockRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes as `(address, value)`
    pub fn get_writes(&self) -> Vec<(usize, u32)> {
        self.write_log.clone()
    }
}

impl RegisterIo for MockRegisters {
    fn read32(&mut self, addr: usize) -> u32 {
        self.values.get(&addr).copied().unwrap_or(0)
    }

    fn write32(&mut self, addr: usize, value: u32) {
        self.write_log.push((addr, value));
        self.values.insert(addr, value);
    }
}

// =============================================================================
// Mock Device Tree Node
// =============================================================================

/// Owned device-tree node built up in tests
#[derive(Debug, Clone)]
pub struct MockNode {
    name: &'static str,
    compatible: Vec<&'static str>,
    enabled: bool,
    reg: Option<(usize, usize)>,
    children: Vec<MockNode>,
}

impl MockNode {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            compatible: Vec::new(),
            enabled: true,
            reg: None,
            children: Vec::new(),
        }
    }

    pub fn with_compatible(mut self, compatible: &[&'static str]) -> Self {
        self.compatible.extend_from_slice(compatible);
        self
    }

    pub fn with_reg(mut self, base: usize, size: usize) -> Self {
        self.reg = Some((base, size));
        self
    }

    pub fn with_child(mut self, child: MockNode) -> Self {
        self.children.push(child);
        self
    }

    /// Mark `status = "disabled"`
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl DeviceNode for MockNode {
    fn name(&self) -> &str {
        self.name
    }

    fn is_compatible(&self, compat: &str) -> bool {
        self.compatible.iter().any(|c| *c == compat)
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn reg(&self) -> Option<(usize, usize)> {
        self.reg
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&Self)) {
        self.children.iter().for_each(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec;

    #[test]
    fn mock_mdio_read_write() {
        let mut mdio = MockMdioBus::new();

        assert_eq!(mdio.read(0, 1).unwrap(), 0);

        mdio.set_register(0, 1, 0x1234);
        assert_eq!(mdio.read(0, 1).unwrap(), 0x1234);

        mdio.write(0, 1, 0x5678).unwrap();
        assert_eq!(mdio.read(0, 1).unwrap(), 0x5678);

        assert_eq!(mdio.get_writes(), vec![(0, 1, 0x5678)]);
        assert_eq!(mdio.read_count(0, 1), 3);
        assert_eq!(mdio.read_count(0, 2), 0);

        assert!(!mdio.is_busy());
        mdio.set_busy(true);
        assert!(mdio.is_busy());
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();

        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 1000);
        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 2000);

        assert_eq!(delay.total_ns(), 3000);
        assert_eq!(delay.total_ms(), 0);

        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 1_000_000);
        assert_eq!(delay.total_ms(), 1);
    }

    #[test]
    fn mock_mdio_rk630_link_simulation() {
        let mut mdio = MockMdioBus::new();
        mdio.setup_rk630(2);

        assert_eq!(mdio.read(2, phy_reg::PHYIDR1).unwrap(), 0x0044);
        assert!(mdio.read(2, phy_reg::BMSR).unwrap() & bmsr::LINK_STATUS == 0);

        mdio.simulate_link_up_100_fd(2);
        let bmsr_val = mdio.read(2, phy_reg::BMSR).unwrap();
        assert!(bmsr_val & bmsr::LINK_STATUS != 0);
        assert!(bmsr_val & bmsr::AN_COMPLETE != 0);

        mdio.simulate_link_down(2);
        assert!(mdio.read(2, phy_reg::BMSR).unwrap() & bmsr::LINK_STATUS == 0);
    }

    #[test]
    fn mock_fuse_reads_programmed_bytes() {
        let mut fuse = MockFuse::new();
        fuse.set_bytes(4, &[0xAA, 0xBB]);

        let mut buf = [0u8; 3];
        fuse.read(3, &mut buf).unwrap();
        assert_eq!(buf, [0x00, 0xAA, 0xBB]);
        assert_eq!(fuse.read_calls(), 1);
    }
}
