//! IEEE 802.3 PHY Register Definitions
//!
//! Standard Clause 22 register addresses and the bit fields the generic PHY
//! layer touches. Registers 16-31 are vendor-specific and live with the
//! chip drivers.
//!
//! | Register | Name | Description |
//! |----------|------|-------------|
//! | 0 | BMCR | Basic Mode Control |
//! | 1 | BMSR | Basic Mode Status |
//! | 2 | PHYIDR1 | PHY Identifier 1 |
//! | 3 | PHYIDR2 | PHY Identifier 2 |
//! | 4 | ANAR | Auto-Negotiation Advertisement |
//! | 5 | ANLPAR | Link Partner Ability |
//! | 13 | MMD_CTRL | MMD Access Control |
//! | 14 | MMD_DATA | MMD Access Address/Data |

#![allow(dead_code)]

/// Standard PHY register addresses (IEEE 802.3 Clause 22)
pub mod phy_reg {
    /// Basic Mode Control Register
    pub const BMCR: u8 = 0x00;
    /// Basic Mode Status Register
    pub const BMSR: u8 = 0x01;
    /// PHY Identifier 1
    pub const PHYIDR1: u8 = 0x02;
    /// PHY Identifier 2
    pub const PHYIDR2: u8 = 0x03;
    /// Auto-Negotiation Advertisement Register
    pub const ANAR: u8 = 0x04;
    /// Auto-Negotiation Link Partner Ability Register
    pub const ANLPAR: u8 = 0x05;
    /// Auto-Negotiation Expansion Register
    pub const ANER: u8 = 0x06;
    /// MMD Access Control Register
    pub const MMD_CTRL: u8 = 0x0D;
    /// MMD Access Address/Data Register
    pub const MMD_DATA: u8 = 0x0E;
}

/// BMCR (Basic Mode Control Register) bits
pub mod bmcr {
    /// Soft reset - self-clearing
    pub const RESET: u16 = 1 << 15;
    /// Loopback mode
    pub const LOOPBACK: u16 = 1 << 14;
    /// Speed select (100 Mbps if set, 10 Mbps if clear)
    pub const SPEED_100: u16 = 1 << 13;
    /// Auto-negotiation enable
    pub const AN_ENABLE: u16 = 1 << 12;
    /// Power down
    pub const POWER_DOWN: u16 = 1 << 11;
    /// Isolate PHY from MII
    pub const ISOLATE: u16 = 1 << 10;
    /// Restart auto-negotiation - self-clearing
    pub const AN_RESTART: u16 = 1 << 9;
    /// Duplex mode (full duplex if set)
    pub const DUPLEX_FULL: u16 = 1 << 8;
}

/// BMSR (Basic Mode Status Register) bits
pub mod bmsr {
    /// 100BASE-TX full duplex capable
    pub const TX_FD_CAPABLE: u16 = 1 << 14;
    /// 100BASE-TX half duplex capable
    pub const TX_HD_CAPABLE: u16 = 1 << 13;
    /// 10BASE-T full duplex capable
    pub const T10_FD_CAPABLE: u16 = 1 << 12;
    /// 10BASE-T half duplex capable
    pub const T10_HD_CAPABLE: u16 = 1 << 11;
    /// Auto-negotiation complete
    pub const AN_COMPLETE: u16 = 1 << 5;
    /// Remote fault detected
    pub const REMOTE_FAULT: u16 = 1 << 4;
    /// Auto-negotiation ability
    pub const AN_ABILITY: u16 = 1 << 3;
    /// Link status (latched low)
    pub const LINK_STATUS: u16 = 1 << 2;
    /// Extended register capabilities
    pub const EXT_CAPABLE: u16 = 1 << 0;
}

/// ANAR / ANLPAR ability bits (shared layout)
pub mod anar {
    /// Asymmetric pause
    pub const PAUSE_ASYM: u16 = 1 << 11;
    /// Pause capable
    pub const PAUSE: u16 = 1 << 10;
    /// 100BASE-T4
    pub const T4: u16 = 1 << 9;
    /// 100BASE-TX full duplex
    pub const TX_FD: u16 = 1 << 8;
    /// 100BASE-TX half duplex
    pub const TX_HD: u16 = 1 << 7;
    /// 10BASE-T full duplex
    pub const T10_FD: u16 = 1 << 6;
    /// 10BASE-T half duplex
    pub const T10_HD: u16 = 1 << 5;
    /// Every speed/duplex/pause ability bit
    pub const ALL_ABILITIES: u16 = PAUSE_ASYM | PAUSE | T4 | TX_FD | TX_HD | T10_FD | T10_HD;
    /// IEEE 802.3 selector value
    pub const SELECTOR_IEEE802_3: u16 = 0x0001;
}

/// MMD access control (register 13) function field
pub mod mmd_ctrl {
    /// Function: address
    pub const FUNC_ADDR: u16 = 0x0000;
    /// Function: data, no post increment
    pub const FUNC_DATA: u16 = 0x4000;
    /// Device address mask
    pub const DEVAD_MASK: u16 = 0x001F;
}

/// MMD device addresses
pub mod mmd_dev {
    /// Auto-negotiation MMD
    pub const AN: u8 = 7;
}

/// Registers inside the auto-negotiation MMD
pub mod mmd_an {
    /// EEE advertisement register
    pub const EEE_ADV: u16 = 0x003C;
}
