//! Zone blueprints — the physical zone map behind each layout tag.
//!
//! Per-board domain knowledge lives here as data; the topology builder
//! consumes it without caring which board contributed it. A strip
//! blueprint with `default_slots == 0` is sized later from the driver
//! config (ARGB header lengths).

use crate::boards::Layout;
use crate::color::ChannelOrder;
use crate::protocol::{
    HDR_BACK_IO, HDR_CPU, HDR_D_LED1, HDR_D_LED1_RGB, HDR_D_LED2, HDR_D_LED2_RGB, HDR_LED_2,
    HDR_LED_7, HDR_LED_C1C2, HDR_PCIE,
};

/// Host-facing classification of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum DeviceKind {
    /// Header-attached accessory (ARGB/RGB fan or strip).
    Fan,
    /// Lighting soldered to the board itself.
    Motherboard,
}

/// How a zone's LEDs are addressed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// One 12V header: one effect write at this address.
    Single(u8),
    /// Several 12V headers driven as one logical zone, one effect write
    /// per address. Slot i maps to `addresses[i]`.
    Composite(&'static [u8]),
    /// Addressable strip: RGB data packets anchored at this header.
    Strip(u8),
}

/// One zone as specified by the board's physical layout.
#[derive(Debug, Clone, Copy)]
pub struct ZoneBlueprint {
    pub name: &'static str,
    pub kind: DeviceKind,
    pub addressing: Addressing,
    pub channel_order: ChannelOrder,
    /// Default LED slot count. Zero means "sized by the strip override
    /// step, or replaced by the generic fallback".
    pub default_slots: usize,
}

const fn single(name: &'static str, kind: DeviceKind, address: u8) -> ZoneBlueprint {
    ZoneBlueprint {
        name,
        kind,
        addressing: Addressing::Single(address),
        channel_order: ChannelOrder::Rgb,
        default_slots: 1,
    }
}

const fn strip(name: &'static str, header: u8) -> ZoneBlueprint {
    ZoneBlueprint {
        name,
        kind: DeviceKind::Fan,
        addressing: Addressing::Strip(header),
        channel_order: ChannelOrder::Rgb,
        default_slots: 0,
    }
}

static MOBO_BACKLIGHT_ADDRS: [u8; 4] = [HDR_BACK_IO, HDR_CPU, HDR_LED_2, HDR_PCIE];

static STD_ATX: [ZoneBlueprint; 6] = [
    strip("ARGB Header 1", HDR_D_LED1_RGB),
    strip("ARGB Header 2", HDR_D_LED2_RGB),
    single("Back I/O", DeviceKind::Motherboard, HDR_BACK_IO),
    single("CPU Header", DeviceKind::Motherboard, HDR_CPU),
    single("PCIExpress", DeviceKind::Motherboard, HDR_PCIE),
    single("C1C2 Header", DeviceKind::Fan, HDR_LED_C1C2),
];

static ITX: [ZoneBlueprint; 5] = [
    strip("ARGB Header 1", HDR_D_LED1_RGB),
    single("Back I/O", DeviceKind::Motherboard, HDR_BACK_IO),
    single("CPU Header", DeviceKind::Motherboard, HDR_CPU),
    single("PCIExpress", DeviceKind::Motherboard, HDR_PCIE),
    single("C1C2 Header", DeviceKind::Fan, HDR_LED_C1C2),
];

static MINI_ITX: [ZoneBlueprint; 4] = [
    strip("ARGB Header 1", HDR_D_LED1_RGB),
    single("Back I/O", DeviceKind::Motherboard, HDR_BACK_IO),
    ZoneBlueprint {
        name: "MOBO Backlight",
        kind: DeviceKind::Motherboard,
        addressing: Addressing::Composite(&MOBO_BACKLIGHT_ADDRS),
        channel_order: ChannelOrder::Rgb,
        default_slots: MOBO_BACKLIGHT_ADDRS.len(),
    },
    single("C1C2 Header", DeviceKind::Fan, HDR_LED_C1C2),
];

static Z390: [ZoneBlueprint; 10] = [
    strip("ARGB Header 1", HDR_D_LED1_RGB),
    // The VRM block is wired to the second strip header with GRB order.
    ZoneBlueprint {
        name: "VRM",
        kind: DeviceKind::Motherboard,
        addressing: Addressing::Strip(HDR_D_LED2_RGB),
        channel_order: ChannelOrder::Grb,
        default_slots: 21,
    },
    single("Back I/O", DeviceKind::Motherboard, HDR_BACK_IO),
    single("CPU Header", DeviceKind::Motherboard, HDR_CPU),
    single("LED Header 2", DeviceKind::Motherboard, HDR_LED_2),
    single("Chipset", DeviceKind::Motherboard, HDR_PCIE),
    single("C1C2 Header", DeviceKind::Motherboard, HDR_LED_C1C2),
    single("D-LED1 Header", DeviceKind::Motherboard, HDR_D_LED1),
    single("D-LED2 Header", DeviceKind::Motherboard, HDR_D_LED2),
    single("LED Header 7", DeviceKind::Motherboard, HDR_LED_7),
];

static FALLBACK: [ZoneBlueprint; 5] = [
    strip("ARGB Header 1", HDR_D_LED1_RGB),
    strip("ARGB Header 2", HDR_D_LED2_RGB),
    single("VRM Block", DeviceKind::Motherboard, HDR_BACK_IO),
    single("PCI Area", DeviceKind::Motherboard, HDR_PCIE),
    single("C1C2 Header", DeviceKind::Fan, HDR_LED_C1C2),
];

/// The ordered zone map for a layout.
pub fn blueprints(layout: Layout) -> &'static [ZoneBlueprint] {
    match layout {
        Layout::StdAtx => &STD_ATX,
        Layout::Itx => &ITX,
        Layout::MiniItx => &MINI_ITX,
        Layout::Z390 => &Z390,
        Layout::Fallback => &FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_layouts() -> [Layout; 5] {
        [
            Layout::StdAtx,
            Layout::Itx,
            Layout::MiniItx,
            Layout::Z390,
            Layout::Fallback,
        ]
    }

    #[test]
    fn every_layout_has_zones() {
        for layout in all_layouts() {
            assert!(!blueprints(layout).is_empty(), "{layout} has no zones");
        }
    }

    #[test]
    fn std_atx_shape() {
        let zones = blueprints(Layout::StdAtx);
        assert_eq!(zones.len(), 6);
        let strips = zones
            .iter()
            .filter(|z| matches!(z.addressing, Addressing::Strip(_)))
            .count();
        assert_eq!(strips, 2);
        let singles = zones
            .iter()
            .filter(|z| matches!(z.addressing, Addressing::Single(_)))
            .count();
        assert_eq!(singles, 4);
    }

    #[test]
    fn composite_slot_count_matches_address_count() {
        for layout in all_layouts() {
            for bp in blueprints(layout) {
                if let Addressing::Composite(addrs) = bp.addressing {
                    assert_eq!(
                        bp.default_slots,
                        addrs.len(),
                        "{}: composite slots must equal address count",
                        bp.name
                    );
                }
            }
        }
    }

    #[test]
    fn single_zones_have_one_slot() {
        for layout in all_layouts() {
            for bp in blueprints(layout) {
                if matches!(bp.addressing, Addressing::Single(_)) {
                    assert_eq!(bp.default_slots, 1, "{}", bp.name);
                }
            }
        }
    }

    #[test]
    fn effect_addresses_in_zone_header_range() {
        use crate::protocol::HDR_ZONE_BASE;
        for layout in all_layouts() {
            for bp in blueprints(layout) {
                match bp.addressing {
                    Addressing::Single(a) => {
                        assert!((HDR_ZONE_BASE..HDR_ZONE_BASE + 8).contains(&a), "{}", bp.name)
                    }
                    Addressing::Composite(addrs) => {
                        for &a in addrs {
                            assert!(
                                (HDR_ZONE_BASE..HDR_ZONE_BASE + 8).contains(&a),
                                "{}",
                                bp.name
                            );
                        }
                    }
                    Addressing::Strip(h) => {
                        assert!(
                            h == crate::protocol::HDR_D_LED1_RGB
                                || h == crate::protocol::HDR_D_LED2_RGB,
                            "{}",
                            bp.name
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn z390_vrm_uses_grb() {
        let vrm = blueprints(Layout::Z390)
            .iter()
            .find(|z| z.name == "VRM")
            .unwrap();
        assert_eq!(vrm.channel_order, ChannelOrder::Grb);
        assert_eq!(vrm.default_slots, 21);
    }

    #[test]
    fn zone_names_unique_within_layout() {
        for layout in all_layouts() {
            let zones = blueprints(layout);
            for i in 0..zones.len() {
                for j in (i + 1)..zones.len() {
                    assert_ne!(zones[i].name, zones[j].name, "{layout}");
                }
            }
        }
    }
}
