//! RK3528 system controllers

use super::{OfDeviceId, SysconDriver, SysconKind};

/// Compatible strings bound by [`RK3528_SYSCON`]
pub static RK3528_SYSCON_IDS: &[OfDeviceId] =
    &[OfDeviceId::new("rockchip,rk3528-grf", SysconKind::Grf)];

/// RK3528 syscon driver
pub static RK3528_SYSCON: SysconDriver = SysconDriver::new("rk3528_syscon", RK3528_SYSCON_IDS);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syscon::{DeviceClass, SysconRegistry};
    use crate::testing::MockNode;

    fn grf_node() -> MockNode {
        MockNode::new("syscon")
            .with_compatible(&["rockchip,rk3528-grf", "syscon", "simple-mfd"])
            .with_reg(0xFF30_0000, 0x9_0000)
    }

    #[test]
    fn driver_description() {
        assert_eq!(RK3528_SYSCON.name, "rk3528_syscon");
        assert_eq!(RK3528_SYSCON.class, DeviceClass::Syscon);
        assert_eq!(RK3528_SYSCON.of_match.len(), 1);
        assert_eq!(RK3528_SYSCON.scan_children, !cfg!(feature = "of-platdata"));
    }

    #[test]
    fn grf_probe_and_lookup() {
        let syscon = RK3528_SYSCON.probe(&grf_node()).unwrap();
        assert_eq!(syscon.kind(), SysconKind::Grf);

        let mut registry: SysconRegistry<4> = SysconRegistry::new();
        registry.register(syscon).unwrap();
        assert_eq!(registry.base_of(SysconKind::Grf), Some(0xFF30_0000));
    }

    #[test]
    fn other_soc_grf_does_not_match() {
        let node = MockNode::new("syscon").with_compatible(&["rockchip,rk3568-grf", "syscon"]);
        assert!(RK3528_SYSCON.of_match(&node).is_none());
    }
}
