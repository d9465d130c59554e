//! Generic PHY Driver Trait
//!
//! This module defines the common interface for all Ethernet PHY drivers,
//! based on IEEE 802.3 Clause 22 standard registers, plus the generic
//! auto-negotiation and link handling every chip driver builds on.

use embedded_hal::delay::DelayNs;

use crate::config::{AN_POLL_INTERVAL_MS, Duplex, Speed};
use crate::error::Result;
use crate::hal::mdio::MdioBus;

// =============================================================================
// Link Status
// =============================================================================

/// Ethernet link status information
///
/// Contains the negotiated or configured link parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    /// Link speed
    pub speed: Speed,
    /// Duplex mode
    pub duplex: Duplex,
}

impl LinkStatus {
    /// Create a new link status
    pub const fn new(speed: Speed, duplex: Duplex) -> Self {
        Self { speed, duplex }
    }

    /// 100 Mbps Full Duplex
    pub const fn fast_full() -> Self {
        Self::new(Speed::Mbps100, Duplex::Full)
    }

    /// 100 Mbps Half Duplex
    pub const fn fast_half() -> Self {
        Self::new(Speed::Mbps100, Duplex::Half)
    }

    /// 10 Mbps Full Duplex
    pub const fn slow_full() -> Self {
        Self::new(Speed::Mbps10, Duplex::Full)
    }

    /// 10 Mbps Half Duplex
    pub const fn slow_half() -> Self {
        Self::new(Speed::Mbps10, Duplex::Half)
    }
}

// =============================================================================
// PHY Capabilities
// =============================================================================

/// PHY abilities, either supported locally or advertised by a partner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyCapabilities {
    /// 100BASE-TX Full Duplex
    pub speed_100_fd: bool,
    /// 100BASE-TX Half Duplex
    pub speed_100_hd: bool,
    /// 10BASE-T Full Duplex
    pub speed_10_fd: bool,
    /// 10BASE-T Half Duplex
    pub speed_10_hd: bool,
    /// Auto-negotiation
    pub auto_negotiation: bool,
    /// PAUSE flow control
    pub pause: bool,
    /// Asymmetric PAUSE
    pub pause_asymmetric: bool,
}

impl PhyCapabilities {
    /// Basic 10/100 feature set: every speed and duplex, no pause
    pub const fn basic_10_100() -> Self {
        Self {
            speed_100_fd: true,
            speed_100_hd: true,
            speed_10_fd: true,
            speed_10_hd: true,
            auto_negotiation: true,
            pause: false,
            pause_asymmetric: false,
        }
    }

    /// Ability bits in ANAR/ANLPAR layout (selector not included)
    pub const fn to_anar_bits(&self) -> u16 {
        use crate::internal::phy_registers::anar;

        let mut bits = 0;
        if self.speed_100_fd {
            bits |= anar::TX_FD;
        }
        if self.speed_100_hd {
            bits |= anar::TX_HD;
        }
        if self.speed_10_fd {
            bits |= anar::T10_FD;
        }
        if self.speed_10_hd {
            bits |= anar::T10_HD;
        }
        if self.pause {
            bits |= anar::PAUSE;
        }
        if self.pause_asymmetric {
            bits |= anar::PAUSE_ASYM;
        }
        bits
    }

    /// Decode ANAR/ANLPAR ability bits
    pub const fn from_anar_bits(bits: u16) -> Self {
        use crate::internal::phy_registers::anar;

        Self {
            speed_100_fd: (bits & anar::TX_FD) != 0,
            speed_100_hd: (bits & anar::TX_HD) != 0,
            speed_10_fd: (bits & anar::T10_FD) != 0,
            speed_10_hd: (bits & anar::T10_HD) != 0,
            auto_negotiation: true,
            pause: (bits & anar::PAUSE) != 0,
            pause_asymmetric: (bits & anar::PAUSE_ASYM) != 0,
        }
    }
}

// =============================================================================
// PHY Descriptor
// =============================================================================

/// Static identity of a PHY driver, used to match a probed PHY ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyDescriptor {
    /// Human-readable driver name
    pub name: &'static str,
    /// PHY identifier (`PHYIDR1 << 16 | PHYIDR2`)
    pub uid: u32,
    /// Bits of the identifier that must match
    pub mask: u32,
    /// Supported feature set
    pub features: PhyCapabilities,
}

impl PhyDescriptor {
    /// Check whether a probed PHY ID belongs to this driver
    pub const fn matches(&self, phy_id: u32) -> bool {
        (phy_id & self.mask) == (self.uid & self.mask)
    }
}

// =============================================================================
// PHY State
// =============================================================================

/// Runtime link state of one PHY instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyState {
    /// Link is up
    pub link: bool,
    /// Auto-negotiation is in use
    pub autoneg: bool,
    /// Resolved or forced speed
    pub speed: Speed,
    /// Resolved or forced duplex
    pub duplex: Duplex,
}

impl PhyState {
    /// Link down, 10 Mbps half duplex
    pub const fn new(autoneg: bool) -> Self {
        Self {
            link: false,
            autoneg,
            speed: Speed::Mbps10,
            duplex: Duplex::Half,
        }
    }

    /// Current link parameters, `None` while the link is down
    pub const fn link_status(&self) -> Option<LinkStatus> {
        if self.link {
            Some(LinkStatus::new(self.speed, self.duplex))
        } else {
            None
        }
    }
}

// =============================================================================
// PHY Driver Trait
// =============================================================================

/// Trait for Ethernet PHY drivers
///
/// This trait defines the common interface for all PHY drivers. Implementations
/// should handle chip-specific register access and initialization sequences.
///
/// All PHY drivers must support the standard Clause 22 registers (0-15),
/// but may also use vendor-specific registers (16-31) for advanced features.
pub trait PhyDriver {
    /// Get the PHY address (0-31)
    fn address(&self) -> u8;

    /// Initialize the PHY
    ///
    /// Runs the chip-specific configuration sequence and arms
    /// auto-negotiation.
    fn init<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()>;

    /// Perform a soft reset
    ///
    /// Writes to BMCR.RESET and waits for it to self-clear.
    fn soft_reset<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()>;

    /// Check if the link is up
    fn is_link_up<M: MdioBus>(&self, mdio: &mut M) -> Result<bool>;

    /// Get current link status with speed/duplex
    ///
    /// Returns `None` if link is down, `Some(LinkStatus)` if link is up.
    fn link_status<M: MdioBus>(&self, mdio: &mut M) -> Result<Option<LinkStatus>>;

    /// Poll for link changes
    ///
    /// Returns `Some(LinkStatus)` when a new link is established,
    /// `None` if link is still down or unchanged.
    fn poll_link<M: MdioBus>(&mut self, mdio: &mut M) -> Result<Option<LinkStatus>>;

    /// Enable auto-negotiation
    fn enable_auto_negotiation<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()>;

    /// Force specific speed and duplex
    ///
    /// Disables auto-negotiation. Mismatched settings will cause link failure.
    fn force_link<M: MdioBus>(&mut self, mdio: &mut M, status: LinkStatus) -> Result<()>;

    /// Get PHY capabilities from BMSR
    fn capabilities<M: MdioBus>(&self, mdio: &mut M) -> Result<PhyCapabilities>;

    /// Read the PHY identifier
    ///
    /// Returns a 32-bit value: `(PHYIDR1 << 16) | PHYIDR2`
    fn phy_id<M: MdioBus>(&self, mdio: &mut M) -> Result<u32>;

    /// Check if auto-negotiation is complete
    fn is_auto_negotiation_complete<M: MdioBus>(&self, mdio: &mut M) -> Result<bool>;

    /// Get the link partner's advertised abilities
    fn link_partner_abilities<M: MdioBus>(&self, mdio: &mut M) -> Result<PhyCapabilities>;
}

// =============================================================================
// Default Implementations
// =============================================================================

/// Helper functions using standard IEEE 802.3 registers
pub mod ieee802_3 {
    use super::*;
    use crate::error::IoError;
    use crate::internal::phy_registers::{anar, bmcr, bmsr, phy_reg};

    /// Read BMSR and check link status bit
    pub fn is_link_up<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<bool> {
        let bmsr_val = mdio.read(phy_addr, phy_reg::BMSR)?;
        Ok((bmsr_val & bmsr::LINK_STATUS) != 0)
    }

    /// Read BMSR and check AN complete bit
    pub fn is_an_complete<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<bool> {
        let bmsr_val = mdio.read(phy_addr, phy_reg::BMSR)?;
        Ok((bmsr_val & bmsr::AN_COMPLETE) != 0)
    }

    /// Perform soft reset via BMCR
    pub fn soft_reset<M: MdioBus>(mdio: &mut M, phy_addr: u8, max_attempts: u32) -> Result<()> {
        mdio.write(phy_addr, phy_reg::BMCR, bmcr::RESET)?;

        for _ in 0..max_attempts {
            let bmcr_val = mdio.read(phy_addr, phy_reg::BMCR)?;
            if (bmcr_val & bmcr::RESET) == 0 {
                return Ok(());
            }
        }

        Err(IoError::Timeout.into())
    }

    /// Enable auto-negotiation and restart it, taking the PHY out of isolation
    pub fn restart_auto_negotiation<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<()> {
        let bmcr_val = mdio.read(phy_addr, phy_reg::BMCR)?;
        mdio.write(
            phy_addr,
            phy_reg::BMCR,
            (bmcr_val | bmcr::AN_ENABLE | bmcr::AN_RESTART) & !bmcr::ISOLATE,
        )
    }

    /// Force speed and duplex
    ///
    /// BMCR is rewritten from scratch, which also clears AN_ENABLE.
    pub fn force_link<M: MdioBus>(mdio: &mut M, phy_addr: u8, status: LinkStatus) -> Result<()> {
        let mut bmcr_val = bmcr::AN_RESTART;

        if matches!(status.speed, Speed::Mbps100) {
            bmcr_val |= bmcr::SPEED_100;
        }
        if matches!(status.duplex, Duplex::Full) {
            bmcr_val |= bmcr::DUPLEX_FULL;
        }

        mdio.write(phy_addr, phy_reg::BMCR, bmcr_val)
    }

    /// Read PHY ID from PHYIDR1 and PHYIDR2
    pub fn read_phy_id<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<u32> {
        let id1 = mdio.read(phy_addr, phy_reg::PHYIDR1)? as u32;
        let id2 = mdio.read(phy_addr, phy_reg::PHYIDR2)? as u32;
        Ok((id1 << 16) | id2)
    }

    /// Read capabilities from BMSR
    pub fn read_capabilities<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<PhyCapabilities> {
        let bmsr_val = mdio.read(phy_addr, phy_reg::BMSR)?;

        Ok(PhyCapabilities {
            speed_100_fd: (bmsr_val & bmsr::TX_FD_CAPABLE) != 0,
            speed_100_hd: (bmsr_val & bmsr::TX_HD_CAPABLE) != 0,
            speed_10_fd: (bmsr_val & bmsr::T10_FD_CAPABLE) != 0,
            speed_10_hd: (bmsr_val & bmsr::T10_HD_CAPABLE) != 0,
            auto_negotiation: (bmsr_val & bmsr::AN_ABILITY) != 0,
            pause: false,
            pause_asymmetric: false,
        })
    }

    /// Read link partner abilities from ANLPAR
    pub fn read_link_partner<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<PhyCapabilities> {
        let anlpar_val = mdio.read(phy_addr, phy_reg::ANLPAR)?;
        Ok(PhyCapabilities::from_anar_bits(anlpar_val))
    }

    /// Program ANAR from `advertise`
    ///
    /// Only the ability bits are replaced; next-page, remote-fault and
    /// selector bits are kept. Returns `true` if the register changed.
    pub fn config_advert<M: MdioBus>(
        mdio: &mut M,
        phy_addr: u8,
        advertise: &PhyCapabilities,
    ) -> Result<bool> {
        let old = mdio.read(phy_addr, phy_reg::ANAR)?;
        let new = (old & !anar::ALL_ABILITIES) | advertise.to_anar_bits();

        if new == old {
            return Ok(false);
        }
        mdio.write(phy_addr, phy_reg::ANAR, new)?;
        Ok(true)
    }

    /// Configure auto-negotiation (or the forced link when it is off)
    ///
    /// Auto-negotiation is restarted when the advertisement changed, or when
    /// BMCR shows it disabled or the PHY isolated.
    pub fn config_aneg<M: MdioBus>(
        mdio: &mut M,
        phy_addr: u8,
        state: &PhyState,
        advertise: &PhyCapabilities,
    ) -> Result<()> {
        if !state.autoneg {
            return force_link(mdio, phy_addr, LinkStatus::new(state.speed, state.duplex));
        }

        let mut restart = config_advert(mdio, phy_addr, advertise)?;
        if !restart {
            let ctl = mdio.read(phy_addr, phy_reg::BMCR)?;
            restart = (ctl & bmcr::AN_ENABLE) == 0 || (ctl & bmcr::ISOLATE) != 0;
        }

        if restart {
            restart_auto_negotiation(mdio, phy_addr)?;
        }
        Ok(())
    }

    /// Refresh `state.link` from BMSR
    ///
    /// While auto-negotiation is enabled and incomplete, BMSR is polled until
    /// it completes or `timeout_ms` elapses; on timeout the link is marked
    /// down and [`IoError::Timeout`] is returned.
    pub fn update_link<M: MdioBus, D: DelayNs>(
        mdio: &mut M,
        phy_addr: u8,
        state: &mut PhyState,
        delay: &mut D,
        timeout_ms: u32,
    ) -> Result<()> {
        let mut bmsr_val = mdio.read(phy_addr, phy_reg::BMSR)?;

        // Link already known up and still up: nothing to wait for
        if state.link && (bmsr_val & bmsr::LINK_STATUS) != 0 {
            return Ok(());
        }

        if state.autoneg && (bmsr_val & bmsr::AN_COMPLETE) == 0 {
            #[cfg(feature = "defmt")]
            defmt::info!("PHY {}: waiting for auto-negotiation", phy_addr);
            #[cfg(feature = "log")]
            log::info!("PHY {phy_addr}: waiting for auto-negotiation");

            let max_polls = timeout_ms / AN_POLL_INTERVAL_MS;
            let mut polls = 0u32;
            while (bmsr_val & bmsr::AN_COMPLETE) == 0 {
                if polls > max_polls {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("PHY {}: auto-negotiation timeout", phy_addr);
                    #[cfg(feature = "log")]
                    log::warn!("PHY {phy_addr}: auto-negotiation timeout");

                    state.link = false;
                    return Err(IoError::Timeout.into());
                }
                bmsr_val = mdio.read(phy_addr, phy_reg::BMSR)?;
                delay.delay_ms(AN_POLL_INTERVAL_MS);
                polls += 1;
            }
            state.link = true;
        } else {
            // Link status is latched low; read again for the current state
            bmsr_val = mdio.read(phy_addr, phy_reg::BMSR)?;
            state.link = (bmsr_val & bmsr::LINK_STATUS) != 0;
        }

        Ok(())
    }

    /// Resolve speed and duplex into `state`
    ///
    /// With auto-negotiation the best common mode of ANAR & ANLPAR wins
    /// (100 before 10, full before half); otherwise BMCR's forced bits are
    /// reported.
    pub fn parse_link<M: MdioBus>(mdio: &mut M, phy_addr: u8, state: &mut PhyState) -> Result<()> {
        state.speed = Speed::Mbps10;
        state.duplex = Duplex::Half;

        if state.autoneg {
            let mut lpa = mdio.read(phy_addr, phy_reg::ANAR)?;
            lpa &= mdio.read(phy_addr, phy_reg::ANLPAR)?;

            if (lpa & (anar::TX_FD | anar::TX_HD)) != 0 {
                state.speed = Speed::Mbps100;
                if (lpa & anar::TX_FD) != 0 {
                    state.duplex = Duplex::Full;
                }
            } else if (lpa & anar::T10_FD) != 0 {
                state.duplex = Duplex::Full;
            }
        } else {
            let bmcr_val = mdio.read(phy_addr, phy_reg::BMCR)?;
            if (bmcr_val & bmcr::DUPLEX_FULL) != 0 {
                state.duplex = Duplex::Full;
            }
            if (bmcr_val & bmcr::SPEED_100) != 0 {
                state.speed = Speed::Mbps100;
            }
        }

        Ok(())
    }
}
