//! RK630 PHY Driver
//!
//! Driver for the Rockchip RK630 10/100 Ethernet macphy and its RV1106
//! integrated sibling.
//!
//! Both parts share one PHY identifier (`0x00441400`) and differ only in the
//! analog front end. Boards wire them to fixed MDIO addresses, and the
//! address is what selects the tuning recipe:
//!
//! | Address | Variant | Process |
//! |---------|---------|---------|
//! | 1 | [`Rk630Variant::S40`] | RK630 |
//! | 2 | [`Rk630Variant::T22`] | RV1106 |
//!
//! # TX Level Calibration
//!
//! The T22 line driver amplitude is trimmed per chip at the factory. The two
//! trim bytes sit in efuse/OTP at the `macphy-txlevel` cell (byte 0 = 10M,
//! byte 1 = 100M). When the cell or the fuse device is missing, or the read
//! fails, the built-in levels are used and bring-up continues.
//!
//! # Example
//!
//! ```ignore
//! use rk_boot_drivers::phy::{Rk630, Rk630Config};
//! use rk_boot_drivers::hal::FuseCell;
//!
//! let config = Rk630Config::new().with_tx_level_cell(FuseCell::new(0x3c, 2));
//! let mut phy = Rk630::probe(&mut mdio, 2, config)?.ok_or(Error::Config(ConfigError::NoMatch))?;
//!
//! phy.config(&mut mdio, &mut otp)?;
//! if let Some(link) = phy.startup(&mut mdio, &mut delay)? {
//!     mac.set_speed(link.speed);
//!     mac.set_duplex(link.duplex);
//! }
//! ```

use embedded_hal::delay::DelayNs;

use crate::config::{RESET_MAX_ATTEMPTS, Rk630Config};
use crate::error::{CalibrationError, CalibrationResult, ConfigError, Result};
use crate::hal::fuse::{FuseCell, FuseReader, NoFuse, read_cell};
use crate::hal::mdio::{self, MdioBus};
use crate::internal::phy_registers::{bmcr, mmd_an, mmd_dev, phy_reg};
use crate::internal::rk630_regs::{addr, page, page1, page2, page6, page8, phy_id, tx_level};

use super::generic::{
    LinkStatus, PhyCapabilities, PhyDescriptor, PhyDriver, PhyState, ieee802_3,
};

/// RK630 PHY identifier
pub const RK630_PHY_ID: u32 = phy_id::ID;
/// RK630 PHY identifier mask
pub const RK630_PHY_ID_MASK: u32 = phy_id::MASK;

// =============================================================================
// Variants
// =============================================================================

/// Analog front-end variant, selected by MDIO address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rk630Variant {
    /// RK630 (S40 process) at address 1
    S40,
    /// RV1106 integrated macphy (T22 process) at address 2
    T22,
}

impl Rk630Variant {
    /// Variant wired to `phy_addr`, if any
    pub const fn from_address(phy_addr: u8) -> Option<Self> {
        match phy_addr {
            addr::S40 => Some(Self::S40),
            addr::T22 => Some(Self::T22),
            _ => None,
        }
    }

    /// Fixed MDIO address of this variant
    pub const fn address(self) -> u8 {
        match self {
            Self::S40 => addr::S40,
            Self::T22 => addr::T22,
        }
    }
}

// =============================================================================
// TX Level
// =============================================================================

/// T22 line driver amplitude trim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxLevel {
    /// 100BASE-TX amplitude
    pub level_100m: u8,
    /// 10BASE-T amplitude
    pub level_10m: u8,
}

impl TxLevel {
    /// Built-in levels used without factory calibration
    pub const DEFAULT: Self = Self::new(tx_level::DEFAULT_100M, tx_level::DEFAULT_10M);

    /// Create a TX level pair
    pub const fn new(level_100m: u8, level_10m: u8) -> Self {
        Self {
            level_100m,
            level_10m,
        }
    }

    /// Decode the two fuse bytes (`[10M, 100M]`)
    pub const fn from_fuse_bytes(bytes: [u8; 2]) -> Self {
        Self::new(bytes[1], bytes[0])
    }

    /// Value for the page 6 AFE_DRIVER2 register
    pub const fn driver2_value(&self) -> u16 {
        ((self.level_100m as u16) << 8) | self.level_10m as u16
    }
}

impl Default for TxLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Read the factory TX levels from efuse/OTP
pub fn read_tx_level<F: FuseReader>(
    fuse: &mut F,
    cell: Option<FuseCell>,
) -> CalibrationResult<TxLevel> {
    if !fuse.is_present() {
        return Err(CalibrationError::DeviceNotFound);
    }
    let cell = cell.ok_or(CalibrationError::MissingCell)?;
    let bytes: [u8; 2] = read_cell(fuse, cell)?;
    Ok(TxLevel::from_fuse_bytes(bytes))
}

// =============================================================================
// RK630 Driver
// =============================================================================

/// RK630 PHY Driver
#[derive(Debug)]
pub struct Rk630 {
    /// PHY address (0-31)
    addr: u8,
    /// Driver configuration
    config: Rk630Config,
    /// Link state as of the last `startup`
    state: PhyState,
    /// Last link state seen by `poll_link`
    last_link_up: bool,
}

impl Rk630 {
    /// Driver identity
    pub const DESCRIPTOR: PhyDescriptor = PhyDescriptor {
        name: "Rockchip RK630",
        uid: RK630_PHY_ID,
        mask: RK630_PHY_ID_MASK,
        features: PhyCapabilities::basic_10_100(),
    };

    /// Create a driver for the PHY at `addr`
    ///
    /// The address is not validated against the variant table until
    /// [`config`](Self::config) runs.
    pub const fn new(addr: u8, config: Rk630Config) -> Self {
        let mut state = PhyState::new(config.autoneg);
        if !config.autoneg {
            state.speed = config.forced_link.speed;
            state.duplex = config.forced_link.duplex;
        }
        Self {
            addr,
            config,
            state,
            last_link_up: false,
        }
    }

    /// Read the PHY ID at `addr` and bind the driver if it is an RK630
    ///
    /// Returns `Ok(None)` when another PHY answers.
    pub fn probe<M: MdioBus>(
        mdio: &mut M,
        addr: u8,
        config: Rk630Config,
    ) -> Result<Option<Self>> {
        mdio::check_phy_addr(addr)?;
        let id = ieee802_3::read_phy_id(mdio, addr)?;
        if !Self::DESCRIPTOR.matches(id) {
            #[cfg(feature = "log")]
            log::debug!("PHY {addr}: id {id:#010x} is not {}", Self::DESCRIPTOR.name);
            return Ok(None);
        }

        #[cfg(feature = "defmt")]
        defmt::info!("PHY {}: {} (id {:#x})", addr, Self::DESCRIPTOR.name, id);
        #[cfg(feature = "log")]
        log::info!("PHY {addr}: {} (id {id:#010x})", Self::DESCRIPTOR.name);

        Ok(Some(Self::new(addr, config)))
    }

    /// Variant selected by the PHY address
    pub const fn variant(&self) -> Option<Rk630Variant> {
        Rk630Variant::from_address(self.addr)
    }

    /// Active configuration
    pub const fn configuration(&self) -> &Rk630Config {
        &self.config
    }

    /// Link state as of the last `startup`
    pub const fn state(&self) -> &PhyState {
        &self.state
    }

    /// Resolve the T22 TX levels, falling back to the configured defaults
    pub fn resolve_tx_level<F: FuseReader>(&self, fuse: &mut F) -> TxLevel {
        match read_tx_level(fuse, self.config.tx_level_cell) {
            Ok(level) => level,
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "PHY {}: txlevel from efuse/otp unavailable: {}",
                    self.addr,
                    _err
                );
                #[cfg(feature = "log")]
                log::warn!("PHY {}: txlevel from efuse/otp unavailable: {_err}", self.addr);

                self.config.default_tx_level
            }
        }
    }

    /// Run the variant's analog front-end sequence, then configure
    /// auto-negotiation
    ///
    /// Fails with [`ConfigError::UnsupportedAddress`] before touching the
    /// bus if the address selects no variant.
    pub fn config<M: MdioBus, F: FuseReader>(
        &mut self,
        mdio: &mut M,
        fuse: &mut F,
    ) -> Result<()> {
        let Some(variant) = self.variant() else {
            #[cfg(feature = "defmt")]
            defmt::error!("Unsupported address for current phy: {}", self.addr);
            #[cfg(feature = "log")]
            log::error!("Unsupported address for current phy: {}", self.addr);

            return Err(ConfigError::UnsupportedAddress.into());
        };

        match variant {
            Rk630Variant::S40 => self.config_s40(mdio)?,
            Rk630Variant::T22 => self.config_t22(mdio, fuse)?,
        }

        ieee802_3::config_aneg(mdio, self.addr, &self.state, &self.config.advertise)
    }

    fn config_s40<M: MdioBus>(&self, mdio: &mut M) -> Result<()> {
        let a = self.addr;

        mdio::modify(mdio, a, phy_reg::BMCR, bmcr::SPEED_100, 0)?;

        mdio::write_paged(mdio, a, page::POWER, &[(page1::APS_CTRL, page1::APS_DISABLE)])?;
        mdio::write_paged(mdio, a, page::AFE, &[(page2::AFE_CTRL, 0x0000)])?;
        mdio::write_paged(
            mdio,
            a,
            page::ANALOG,
            &[
                (page6::AFE_TX_CTRL, 0x708f),
                (page6::AFE_RX_CTRL, 0xf000),
                (page6::AFE_DRIVER2, 0x1530),
            ],
        )?;
        mdio::write_paged(mdio, a, page::CALIBRATION, &[(page8::AFE_CTRL, 0x00bc)])?;
        mdio::select_page(mdio, a, page::STANDARD)
    }

    fn config_t22<M: MdioBus, F: FuseReader>(&self, mdio: &mut M, fuse: &mut F) -> Result<()> {
        let a = self.addr;

        mdio::write_paged(mdio, a, page::POWER, &[(page1::APS_CTRL, page1::APS_DISABLE)])?;
        mdio::write_paged(mdio, a, page::AFE, &[(page2::AFE_CTRL, 0x0000)])?;
        mdio::write_paged(
            mdio,
            a,
            page::ANALOG,
            &[
                (page6::ADC_ANONTROL, 0x5540),
                (page6::GAIN_ANONTROL, 0x0400),
                (page6::AFE_TX_CTRL, 0x1088),
            ],
        )?;

        let level = self.resolve_tx_level(fuse);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "PHY {}: txlevel 100M={:#x} 10M={:#x}",
            a,
            level.level_100m,
            level.level_10m
        );
        #[cfg(feature = "log")]
        log::debug!(
            "PHY {a}: txlevel 100M={:#04x} 10M={:#04x}",
            level.level_100m,
            level.level_10m
        );

        // Still on page 6
        for (reg_addr, value) in [
            (page6::AFE_DRIVER2, level.driver2_value()),
            (page6::CP_CURRENT, 0x0575),
            (page6::ADC_OP_BIAS, 0x0000),
            (page6::RX_DECTOR, 0x0408),
            (page6::AFE_PDCW, 0x8880),
            (page6::TX_MOS_DRV, 0x888e),
        ] {
            mdio.write(a, reg_addr, value)?;
        }

        mdio::write_paged(mdio, a, page::CALIBRATION, &[(page8::AUTO_CAL, 0x0844)])?;
        mdio::select_page(mdio, a, page::STANDARD)?;

        // EEE advertisement off
        mdio::mmd_write(mdio, a, mmd_dev::AN, mmd_an::EEE_ADV, 0x0000)
    }

    /// Bring the link up and resolve speed/duplex
    ///
    /// BMSR is read once more after the link update: the link bit is
    /// latched, and the second read reflects the current state.
    pub fn startup<M: MdioBus, D: DelayNs>(
        &mut self,
        mdio: &mut M,
        delay: &mut D,
    ) -> Result<Option<LinkStatus>> {
        ieee802_3::update_link(
            mdio,
            self.addr,
            &mut self.state,
            delay,
            self.config.an_timeout_ms,
        )?;

        mdio.read(self.addr, phy_reg::BMSR)?;

        ieee802_3::parse_link(mdio, self.addr, &mut self.state)?;

        #[cfg(feature = "defmt")]
        if let Some(link) = self.state.link_status() {
            defmt::info!(
                "PHY {}: link up {} Mbps {}",
                self.addr,
                link.speed.mbps(),
                if link.duplex == crate::config::Duplex::Full { "full" } else { "half" }
            );
        }
        #[cfg(feature = "log")]
        if let Some(link) = self.state.link_status() {
            log::info!(
                "PHY {}: link up {} Mbps {}",
                self.addr,
                link.speed.mbps(),
                if link.duplex == crate::config::Duplex::Full { "full" } else { "half" }
            );
        }

        Ok(self.state.link_status())
    }
}

impl PhyDriver for Rk630 {
    fn address(&self) -> u8 {
        self.addr
    }

    /// Runs [`Rk630::config`] without a fuse device (built-in TX levels)
    fn init<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()> {
        self.config(mdio, &mut NoFuse)?;
        self.last_link_up = false;
        Ok(())
    }

    fn soft_reset<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()> {
        ieee802_3::soft_reset(mdio, self.addr, RESET_MAX_ATTEMPTS)
    }

    fn is_link_up<M: MdioBus>(&self, mdio: &mut M) -> Result<bool> {
        ieee802_3::is_link_up(mdio, self.addr)
    }

    fn link_status<M: MdioBus>(&self, mdio: &mut M) -> Result<Option<LinkStatus>> {
        if !self.is_link_up(mdio)? {
            return Ok(None);
        }

        let mut state = self.state;
        state.link = true;
        ieee802_3::parse_link(mdio, self.addr, &mut state)?;
        Ok(state.link_status())
    }

    fn poll_link<M: MdioBus>(&mut self, mdio: &mut M) -> Result<Option<LinkStatus>> {
        let link_up = self.is_link_up(mdio)?;

        if link_up && !self.last_link_up {
            self.last_link_up = true;
            self.state.link = true;
            ieee802_3::parse_link(mdio, self.addr, &mut self.state)?;
            return Ok(self.state.link_status());
        }

        if !link_up && self.last_link_up {
            self.last_link_up = false;
            self.state.link = false;
        }

        Ok(None)
    }

    fn enable_auto_negotiation<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()> {
        self.state.autoneg = true;
        ieee802_3::config_advert(mdio, self.addr, &self.config.advertise)?;
        ieee802_3::restart_auto_negotiation(mdio, self.addr)
    }

    fn force_link<M: MdioBus>(&mut self, mdio: &mut M, status: LinkStatus) -> Result<()> {
        self.state.autoneg = false;
        self.state.speed = status.speed;
        self.state.duplex = status.duplex;
        ieee802_3::force_link(mdio, self.addr, status)
    }

    fn capabilities<M: MdioBus>(&self, mdio: &mut M) -> Result<PhyCapabilities> {
        ieee802_3::read_capabilities(mdio, self.addr)
    }

    fn phy_id<M: MdioBus>(&self, mdio: &mut M) -> Result<u32> {
        ieee802_3::read_phy_id(mdio, self.addr)
    }

    fn is_auto_negotiation_complete<M: MdioBus>(&self, mdio: &mut M) -> Result<bool> {
        ieee802_3::is_an_complete(mdio, self.addr)
    }

    fn link_partner_abilities<M: MdioBus>(&self, mdio: &mut M) -> Result<PhyCapabilities> {
        ieee802_3::read_link_partner(mdio, self.addr)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
