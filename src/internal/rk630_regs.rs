//! RK630 Vendor-Specific Register Definitions
//!
//! The RK630 macphy multiplexes registers 0x10-0x1E across pages. A page is
//! selected by writing `page << 8` to [`reg::PAGE_SEL`]; page 0 holds the
//! standard Clause 22 view plus the global vendor registers.
//!
//! Values written here come from the vendor analog front-end tuning recipe
//! and have no further documented field breakdown.

#![allow(dead_code)]

/// PHY identifier constants
pub mod phy_id {
    /// RK630 PHY identifier
    pub const ID: u32 = 0x0044_1400;
    /// Identifier mask (OUI + model; revision bits are ignored by hardware)
    pub const MASK: u32 = 0x00FF_FFFF;
}

/// Fixed MDIO addresses selecting the integration variant
pub mod addr {
    /// RK630 on the S40 process
    pub const S40: u8 = 1;
    /// RV1106 integrated macphy on the T22 process
    pub const T22: u8 = 2;
}

/// Page 0 and page-independent registers
pub mod reg {
    /// Interrupt status
    pub const INTERRUPT_STATUS: u8 = 0x10;
    /// Interrupt mask
    pub const INTERRUPT_MASK: u8 = 0x11;
    /// Global configuration
    pub const GLOBAL_CONFIGURATION: u8 = 0x13;
    /// MAC address word 0
    pub const MAC_ADDRESS0: u8 = 0x16;
    /// MAC address word 1
    pub const MAC_ADDRESS1: u8 = 0x17;
    /// MAC address word 2
    pub const MAC_ADDRESS2: u8 = 0x18;
    /// Page select
    pub const PAGE_SEL: u8 = 0x1F;
}

/// Page indices
pub mod page {
    /// Standard registers
    pub const STANDARD: u8 = 0;
    /// Power saving
    pub const POWER: u8 = 1;
    /// Analog front end
    pub const AFE: u8 = 2;
    /// Analog tuning
    pub const ANALOG: u8 = 6;
    /// Calibration
    pub const CALIBRATION: u8 = 8;
}

/// Page 1 registers
pub mod page1 {
    /// Auto power saving control
    pub const APS_CTRL: u8 = 0x12;
    /// Ultra power saving configuration
    pub const UAPS_CONFIGURE: u8 = 0x13;
    /// EEE configuration
    pub const EEE_CONFIGURE: u8 = 0x17;

    /// APS disabled
    pub const APS_DISABLE: u16 = 0x4824;
}

/// Page 2 registers
pub mod page2 {
    /// AFE control
    pub const AFE_CTRL: u8 = 0x18;
}

/// Page 6 registers
pub mod page6 {
    /// ADC analog control
    pub const ADC_ANONTROL: u8 = 0x10;
    /// Gain analog control
    pub const GAIN_ANONTROL: u8 = 0x12;
    /// AFE RX control
    pub const AFE_RX_CTRL: u8 = 0x13;
    /// AFE TX control
    pub const AFE_TX_CTRL: u8 = 0x14;
    /// AFE line driver 2 (TX amplitude: `100M << 8 | 10M`)
    pub const AFE_DRIVER2: u8 = 0x15;
    /// Charge pump current
    pub const CP_CURRENT: u8 = 0x17;
    /// ADC op-amp bias
    pub const ADC_OP_BIAS: u8 = 0x18;
    /// RX signal detector
    pub const RX_DECTOR: u8 = 0x19;
    /// TX MOS driver
    pub const TX_MOS_DRV: u8 = 0x1B;
    /// AFE power-down control word
    pub const AFE_PDCW: u8 = 0x1C;
}

/// Page 8 registers
pub mod page8 {
    /// AFE control
    pub const AFE_CTRL: u8 = 0x18;
    /// Auto calibration
    pub const AUTO_CAL: u8 = 0x1D;
}

/// Default T22 TX amplitude levels
pub mod tx_level {
    /// 100BASE-TX amplitude
    pub const DEFAULT_100M: u8 = 0x2D;
    /// 10BASE-T amplitude
    pub const DEFAULT_10M: u8 = 0x32;
}
