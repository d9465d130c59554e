//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//!
//! # Contents
//!
//! - [`phy_registers`]: IEEE 802.3 Clause 22 PHY register definitions
//! - [`rk630_regs`]: RK630 paged vendor register map
//!
//! **WARNING:** This module is `pub(crate)` only. Items here may change
//! without notice.

pub(crate) mod phy_registers;
pub(crate) mod rk630_regs;
