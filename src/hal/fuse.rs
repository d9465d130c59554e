//! Efuse/OTP access
//!
//! Factory calibration data lives in one-time-programmable storage. Rockchip
//! SoCs carry either an efuse block or an OTP block; both present the same
//! byte-addressed read interface, modelled by [`FuseReader`].
//!
//! Where a value lives is described per board by a device-tree cell
//! (a `reg = <offset len>` pair under a named subnode of the fuse device),
//! modelled by [`FuseCell`].

use crate::error::{CalibrationError, CalibrationResult};

/// Byte-addressed read access to efuse/OTP storage
pub trait FuseReader {
    /// Whether a fuse device is actually present
    fn is_present(&self) -> bool {
        true
    }

    /// Fill `buf` with bytes starting at `offset`
    fn read(&mut self, offset: u32, buf: &mut [u8]) -> CalibrationResult<()>;
}

impl<F: FuseReader + ?Sized> FuseReader for &mut F {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }

    fn read(&mut self, offset: u32, buf: &mut [u8]) -> CalibrationResult<()> {
        (**self).read(offset, buf)
    }
}

/// Stand-in for boards without efuse/OTP support
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFuse;

impl FuseReader for NoFuse {
    fn is_present(&self) -> bool {
        false
    }

    fn read(&mut self, _offset: u32, _buf: &mut [u8]) -> CalibrationResult<()> {
        Err(CalibrationError::DeviceNotFound)
    }
}

/// Location of a calibration value inside fuse storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FuseCell {
    /// Byte offset into the fuse array
    pub offset: u32,
    /// Cell length in bytes
    pub len: u32,
}

impl FuseCell {
    /// Create a cell description
    pub const fn new(offset: u32, len: u32) -> Self {
        Self { offset, len }
    }

    /// Build a cell from a raw two-cell `reg` property
    ///
    /// Returns `None` unless exactly two cells are present.
    pub fn from_reg(reg: &[u32]) -> Option<Self> {
        match *reg {
            [offset, len] => Some(Self::new(offset, len)),
            _ => None,
        }
    }
}

/// Read `N` bytes from the start of `cell`
///
/// Fails with [`CalibrationError::InvalidCell`] if the cell is shorter than
/// the requested data.
pub fn read_cell<F: FuseReader, const N: usize>(
    fuse: &mut F,
    cell: FuseCell,
) -> CalibrationResult<[u8; N]> {
    if !fuse.is_present() {
        return Err(CalibrationError::DeviceNotFound);
    }
    if (cell.len as usize) < N {
        return Err(CalibrationError::InvalidCell);
    }
    let mut buf = [0u8; N];
    fuse.read(cell.offset, &mut buf)?;
    Ok(buf)
}
