//! System Controller (syscon) Binding
//!
//! A syscon is a shared block of miscellaneous SoC configuration registers
//! (Rockchip calls the main one the GRF, "general register files"). Other
//! drivers do not own it; they look it up by [`SysconKind`] and poke the
//! bits they need through its [`RegisterBlock`].
//!
//! # Lifecycle
//!
//! 1. **Match**: a device-tree node is matched against a driver's static
//!    compatible table ([`SysconDriver::of_match`]).
//! 2. **Bind**: enabled child nodes are handed to the framework for binding
//!    ([`SysconDriver::bind`]). Skipped when built with `of-platdata`.
//! 3. **Probe**: the node's `reg` window becomes a [`Syscon`]
//!    ([`SysconDriver::probe`]) and is registered in a [`SysconRegistry`].
//!
//! # Example
//!
//! ```ignore
//! use rk_boot_drivers::syscon::{SysconKind, SysconRegistry, rk3528::RK3528_SYSCON};
//!
//! let mut registry: SysconRegistry<4> = SysconRegistry::new();
//! RK3528_SYSCON.bind(&grf_node, |child| framework.bind(child))?;
//! registry.register(RK3528_SYSCON.probe(&grf_node)?)?;
//!
//! let grf = registry.get(SysconKind::Grf).unwrap();
//! grf.block().clrset(&mut mmio, 0x0404, 0x0003, 0x0001)?;
//! ```

#[cfg(feature = "rk3528")]
#[cfg_attr(docsrs, doc(cfg(feature = "rk3528")))]
pub mod rk3528;

use crate::error::{ConfigError, ConfigResult, Result};
use crate::hal::regs::RegisterBlock;

// =============================================================================
// Identifiers
// =============================================================================

/// Kind of system controller register block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SysconKind {
    /// Network-on-chip QoS
    Noc,
    /// General register files
    Grf,
    /// Secure general register files
    Sgrf,
    /// Power management unit
    Pmu,
    /// PMU general register files
    Pmugrf,
    /// PMU secure general register files
    Pmusgrf,
    /// Memory scheduler
    Msch,
}

/// Driver model class a driver registers under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum DeviceClass {
    /// System controller
    Syscon,
}

/// One entry of a compatible-string match table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OfDeviceId {
    /// Device-tree `compatible` string
    pub compatible: &'static str,
    /// Register block kind bound to this compatible
    pub data: SysconKind,
}

impl OfDeviceId {
    /// Create a table entry
    pub const fn new(compatible: &'static str, data: SysconKind) -> Self {
        Self { compatible, data }
    }
}

// =============================================================================
// Device Tree View
// =============================================================================

/// The parts of a device-tree node a syscon driver reads
pub trait DeviceNode {
    /// Node name (without unit address)
    fn name(&self) -> &str;

    /// Whether `compat` appears in the node's `compatible` list
    fn is_compatible(&self, compat: &str) -> bool;

    /// `status` is absent or `"okay"`
    fn is_enabled(&self) -> bool;

    /// First `reg` entry as `(base, size)`
    fn reg(&self) -> Option<(usize, usize)>;

    /// Visit direct children in device-tree order
    fn for_each_child(&self, f: &mut dyn FnMut(&Self));
}

// =============================================================================
// Syscon Device
// =============================================================================

/// A probed system controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Syscon {
    kind: SysconKind,
    compatible: &'static str,
    block: RegisterBlock,
}

impl Syscon {
    /// Register block kind
    pub const fn kind(&self) -> SysconKind {
        self.kind
    }

    /// Compatible string the node matched
    pub const fn compatible(&self) -> &'static str {
        self.compatible
    }

    /// Register window
    pub const fn block(&self) -> &RegisterBlock {
        &self.block
    }
}

// =============================================================================
// Syscon Driver
// =============================================================================

/// Static description of a syscon driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SysconDriver {
    /// Driver name
    pub name: &'static str,
    /// Driver model class
    pub class: DeviceClass,
    /// Compatible table, searched in order
    pub of_match: &'static [OfDeviceId],
    /// Bind child nodes from the device tree
    pub scan_children: bool,
}

impl SysconDriver {
    /// Describe a syscon driver
    ///
    /// Child scanning is disabled when device data comes from compiled-in
    /// platform data instead of a live device tree.
    pub const fn new(name: &'static str, of_match: &'static [OfDeviceId]) -> Self {
        Self {
            name,
            class: DeviceClass::Syscon,
            of_match,
            scan_children: !cfg!(feature = "of-platdata"),
        }
    }

    /// First table entry compatible with `node`
    pub fn of_match<N: DeviceNode>(&self, node: &N) -> Option<&'static OfDeviceId> {
        self.of_match.iter().find(|id| node.is_compatible(id.compatible))
    }

    /// Bind the enabled children of `node`
    ///
    /// Disabled children are skipped. A failing child does not stop the
    /// scan; the first error is returned once every child has been offered.
    /// Returns the number of children bound.
    pub fn bind<N, B>(&self, node: &N, mut binder: B) -> Result<usize>
    where
        N: DeviceNode,
        B: FnMut(&N) -> Result<()>,
    {
        if !self.scan_children {
            return Ok(0);
        }

        let mut bound = 0usize;
        let mut first_err = None;

        node.for_each_child(&mut |child| {
            if !child.is_enabled() {
                #[cfg(feature = "defmt")]
                defmt::debug!("{}: ignoring disabled device {}", self.name, child.name());
                #[cfg(feature = "log")]
                log::debug!("{}: ignoring disabled device {}", self.name, child.name());
                return;
            }
            match binder(child) {
                Ok(()) => bound += 1,
                Err(err) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("{}: {} failed to bind: {}", self.name, child.name(), err);
                    #[cfg(feature = "log")]
                    log::debug!("{}: {} failed to bind: {err}", self.name, child.name());
                    first_err.get_or_insert(err);
                }
            }
        });

        if let Some(err) = first_err {
            #[cfg(feature = "defmt")]
            defmt::warn!("{}: some drivers failed to bind", self.name);
            #[cfg(feature = "log")]
            log::warn!("{}: some drivers failed to bind", self.name);
            return Err(err);
        }
        Ok(bound)
    }

    /// Turn a matching node into a [`Syscon`]
    pub fn probe<N: DeviceNode>(&self, node: &N) -> Result<Syscon> {
        let id = self.of_match(node).ok_or(ConfigError::NoMatch)?;
        let (base, size) = node.reg().ok_or(ConfigError::InvalidRegProperty)?;
        let block = RegisterBlock::new(base, size)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("{}: {} at {:#x} size {:#x}", self.name, id.compatible, base, size);
        #[cfg(feature = "log")]
        log::debug!("{}: {} at {base:#x} size {size:#x}", self.name, id.compatible);

        Ok(Syscon {
            kind: id.data,
            compatible: id.compatible,
            block,
        })
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Fixed-capacity table of probed syscons, keyed by kind
#[derive(Debug)]
pub struct SysconRegistry<const N: usize> {
    entries: [Option<Syscon>; N],
}

impl<const N: usize> Default for SysconRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SysconRegistry<N> {
    /// Empty registry
    pub const fn new() -> Self {
        Self { entries: [None; N] }
    }

    /// Register a syscon, replacing any entry of the same kind
    pub fn register(&mut self, syscon: Syscon) -> Result<()> {
        if let Some(slot) = self
            .entries
            .iter_mut()
            .find(|slot| slot.is_some_and(|s| s.kind == syscon.kind))
        {
            *slot = Some(syscon);
            return Ok(());
        }

        let slot = self
            .entries
            .iter_mut()
            .find(|slot| slot.is_none())
            .ok_or(ConfigError::RegistryFull)?;
        *slot = Some(syscon);
        Ok(())
    }

    /// Look up a syscon by kind
    pub fn get(&self, kind: SysconKind) -> Option<&Syscon> {
        self.entries.iter().flatten().find(|s| s.kind == kind)
    }

    /// Look up a syscon that must have been probed
    ///
    /// Fails with [`ConfigError::MissingNode`] if no node of `kind` was
    /// registered.
    pub fn require(&self, kind: SysconKind) -> ConfigResult<&Syscon> {
        self.get(kind).ok_or(ConfigError::MissingNode)
    }

    /// Base address of the syscon of `kind`
    pub fn base_of(&self, kind: SysconKind) -> Option<usize> {
        self.get(kind).map(|s| s.block.base())
    }

    /// Number of registered syscons
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    /// `true` if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
