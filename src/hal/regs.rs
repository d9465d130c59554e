//! Memory-mapped register blocks
//!
//! A syscon node describes a window of 32-bit registers. [`RegisterBlock`]
//! bounds-checks accesses into that window and forwards them to a
//! [`RegisterIo`] backend: volatile MMIO on hardware ([`Mmio`]), a mock in
//! tests.

use crate::error::{ConfigError, ConfigResult};

/// Raw 32-bit register access by absolute address
pub trait RegisterIo {
    /// Read the register at `addr`
    fn read32(&mut self, addr: usize) -> u32;

    /// Write `value` to the register at `addr`
    fn write32(&mut self, addr: usize, value: u32);
}

impl<R: RegisterIo + ?Sized> RegisterIo for &mut R {
    fn read32(&mut self, addr: usize) -> u32 {
        (**self).read32(addr)
    }

    fn write32(&mut self, addr: usize, value: u32) {
        (**self).write32(addr, value);
    }
}

/// Volatile MMIO backend
#[derive(Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Create an MMIO backend
    ///
    /// # Safety
    ///
    /// Every address later passed through this backend must be a valid,
    /// 4-byte aligned device register that is safe to access volatilely.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterIo for Mmio {
    #[inline(always)]
    fn read32(&mut self, addr: usize) -> u32 {
        // SAFETY: guaranteed by the contract of `Mmio::new`.
        unsafe { core::ptr::read_volatile(addr as *const u32) }
    }

    #[inline(always)]
    fn write32(&mut self, addr: usize, value: u32) {
        // SAFETY: guaranteed by the contract of `Mmio::new`.
        unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
    }
}

/// Rockchip "hiword" write value
///
/// The upper 16 bits are a write-enable mask for the lower 16, so a single
/// store updates only the masked bits without a read-modify-write.
#[inline(always)]
pub const fn hiword(mask: u16, value: u16) -> u32 {
    ((mask as u32) << 16) | (value & mask) as u32
}

/// A bounded window of 32-bit registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterBlock {
    base: usize,
    size: usize,
}

impl RegisterBlock {
    /// Describe a register window
    ///
    /// The base must be 4-byte aligned and the window non-empty.
    pub const fn new(base: usize, size: usize) -> ConfigResult<Self> {
        if size == 0 || base % 4 != 0 {
            return Err(ConfigError::InvalidRegProperty);
        }
        Ok(Self { base, size })
    }

    /// First address of the window
    pub const fn base(&self) -> usize {
        self.base
    }

    /// Window size in bytes
    pub const fn size(&self) -> usize {
        self.size
    }

    fn address(&self, offset: usize) -> ConfigResult<usize> {
        if offset % 4 != 0 || offset.checked_add(4).is_none_or(|end| end > self.size) {
            return Err(ConfigError::InvalidOffset);
        }
        Ok(self.base + offset)
    }

    /// Read the register at byte `offset`
    pub fn read<R: RegisterIo>(&self, io: &mut R, offset: usize) -> ConfigResult<u32> {
        let addr = self.address(offset)?;
        Ok(io.read32(addr))
    }

    /// Write the register at byte `offset`
    pub fn write<R: RegisterIo>(&self, io: &mut R, offset: usize, value: u32) -> ConfigResult<()> {
        let addr = self.address(offset)?;
        io.write32(addr, value);
        Ok(())
    }

    /// Update the `mask` bits of a hiword-masked register at `offset`
    pub fn hiword_update<R: RegisterIo>(
        &self,
        io: &mut R,
        offset: usize,
        mask: u16,
        value: u16,
    ) -> ConfigResult<()> {
        self.write(io, offset, hiword(mask, value))
    }

    /// Clear `clear` then set `set` in a hiword-masked register
    pub fn clrset<R: RegisterIo>(
        &self,
        io: &mut R,
        offset: usize,
        clear: u16,
        set: u16,
    ) -> ConfigResult<()> {
        self.hiword_update(io, offset, clear | set, set)
    }
}
