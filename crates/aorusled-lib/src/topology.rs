//! Topology building — expands a layout's blueprints into concrete zones.
//!
//! Build is a two-pass population: blueprints are instantiated (strips
//! taking their length from the ARGB header config), zones that end up
//! with no slots are demoted to a one-slot generic fallback device, and
//! every slot array is then re-initialized with sequential indices,
//! derived names, and black. Every built zone carries at least one slot.

use crate::boards::Layout;
use crate::color::{BLACK, ChannelOrder, Color};
use crate::profiles::{self, Addressing, DeviceKind, ZoneBlueprint};

/// One LED position inside a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedSlot {
    pub index: usize,
    pub name: String,
    pub color: Color,
}

/// An addressable lighting unit on the board.
#[derive(Debug, Clone)]
pub struct Zone {
    pub name: String,
    pub kind: DeviceKind,
    pub addressing: Addressing,
    pub channel_order: ChannelOrder,
    pub slots: Vec<LedSlot>,
}

impl Zone {
    /// Set one slot's color. Out-of-range indices are ignored.
    pub fn set_color(&mut self, slot: usize, color: Color) {
        if let Some(s) = self.slots.get_mut(slot) {
            s.color = color;
        }
    }

    /// Set every slot to the same color.
    pub fn fill(&mut self, color: Color) {
        for s in &mut self.slots {
            s.color = color;
        }
    }

    /// Replace the slot array with `count` freshly numbered black slots.
    /// Used by the topology build and by the host's device override.
    pub fn resize_slots(&mut self, count: usize) {
        self.slots = (0..count)
            .map(|i| LedSlot {
                index: i,
                name: format!("{} {}", self.name, i + 1),
                color: BLACK,
            })
            .collect();
    }
}

fn instantiate(bp: &ZoneBlueprint) -> Zone {
    Zone {
        name: bp.name.to_string(),
        kind: bp.kind,
        addressing: bp.addressing,
        channel_order: bp.channel_order,
        slots: Vec::new(),
    }
}

/// Build the concrete zone list for a layout.
///
/// `strip_lengths` sizes the unsized ARGB strip headers, in blueprint
/// order (header 1, header 2). Lengths are clamped to at least one LED.
pub fn build_zones(layout: Layout, strip_lengths: [usize; 2]) -> Vec<Zone> {
    let mut zones: Vec<Zone> = Vec::new();
    let mut strip_index = 0usize;

    for bp in profiles::blueprints(layout) {
        let mut zone = instantiate(bp);

        let mut slot_count = bp.default_slots;
        if matches!(bp.addressing, Addressing::Strip(_)) && slot_count == 0 {
            // Strip override step: unsized strips take the configured
            // header length.
            slot_count = strip_lengths
                .get(strip_index)
                .copied()
                .unwrap_or(1)
                .max(1);
            strip_index += 1;
        }

        // Zones that still have no slots become one-slot generic
        // fallback devices.
        if slot_count == 0 {
            slot_count = 1;
        }

        zone.resize_slots(slot_count);
        zones.push(zone);
    }
    zones
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_STRIPS: [usize; 2] = [32, 32];

    fn all_layouts() -> [Layout; 5] {
        [
            Layout::StdAtx,
            Layout::Itx,
            Layout::MiniItx,
            Layout::Z390,
            Layout::Fallback,
        ]
    }

    // ── post-conditions ──

    #[test]
    fn every_zone_has_at_least_one_slot() {
        for layout in all_layouts() {
            for zone in build_zones(layout, DEFAULT_STRIPS) {
                assert!(!zone.slots.is_empty(), "{layout}: {}", zone.name);
            }
        }
    }

    #[test]
    fn slots_are_sequential_and_named() {
        for layout in all_layouts() {
            for zone in build_zones(layout, DEFAULT_STRIPS) {
                for (i, slot) in zone.slots.iter().enumerate() {
                    assert_eq!(slot.index, i, "{}: index gap", zone.name);
                    assert_eq!(slot.name, format!("{} {}", zone.name, i + 1));
                    assert_eq!(slot.color, BLACK);
                }
            }
        }
    }

    #[test]
    fn composite_slot_count_matches_addresses() {
        for layout in all_layouts() {
            for zone in build_zones(layout, DEFAULT_STRIPS) {
                if let Addressing::Composite(addrs) = zone.addressing {
                    assert_eq!(zone.slots.len(), addrs.len(), "{}", zone.name);
                }
            }
        }
    }

    // ── scenario: B550 AORUS PRO ──

    #[test]
    fn std_atx_builds_six_zones() {
        let zones = build_zones(Layout::StdAtx, DEFAULT_STRIPS);
        assert_eq!(zones.len(), 6);

        let strips: Vec<_> = zones
            .iter()
            .filter(|z| matches!(z.addressing, Addressing::Strip(_)))
            .collect();
        assert_eq!(strips.len(), 2);
        assert_eq!(strips[0].slots.len(), 32);
        assert_eq!(strips[1].slots.len(), 32);

        let singles: Vec<_> = zones
            .iter()
            .filter(|z| matches!(z.addressing, Addressing::Single(_)))
            .collect();
        assert_eq!(singles.len(), 4);
        for zone in singles {
            assert_eq!(zone.slots.len(), 1, "{}", zone.name);
            assert_eq!(zone.slots[0].color, BLACK);
        }
    }

    // ── strip sizing ──

    #[test]
    fn strip_lengths_apply_in_header_order() {
        let zones = build_zones(Layout::StdAtx, [7, 12]);
        assert_eq!(zones[0].slots.len(), 7);
        assert_eq!(zones[1].slots.len(), 12);
    }

    #[test]
    fn zero_length_strip_becomes_single_slot_fallback() {
        let zones = build_zones(Layout::StdAtx, [0, 0]);
        assert_eq!(zones[0].slots.len(), 1);
        assert_eq!(zones[1].slots.len(), 1);
        assert_eq!(zones[0].slots[0].name, "ARGB Header 1 1");
    }

    #[test]
    fn presized_strip_ignores_config() {
        // The Z390 VRM strip has a fixed hardware length.
        let zones = build_zones(Layout::Z390, [5, 5]);
        let vrm = zones.iter().find(|z| z.name == "VRM").unwrap();
        assert_eq!(vrm.slots.len(), 21);
        // The ARGB header still takes the configured length.
        let argb = zones.iter().find(|z| z.name == "ARGB Header 1").unwrap();
        assert_eq!(argb.slots.len(), 5);
    }

    // ── rebuild semantics ──

    #[test]
    fn rebuild_resets_colors() {
        let mut zones = build_zones(Layout::Itx, DEFAULT_STRIPS);
        zones[1].set_color(0, Color::new(1, 2, 3));
        let rebuilt = build_zones(Layout::Itx, DEFAULT_STRIPS);
        assert_eq!(rebuilt[1].slots[0].color, BLACK);
    }

    #[test]
    fn set_color_ignores_out_of_range() {
        let mut zones = build_zones(Layout::Itx, DEFAULT_STRIPS);
        zones[1].set_color(99, Color::new(1, 2, 3));
        assert_eq!(zones[1].slots[0].color, BLACK);
    }

    #[test]
    fn fill_sets_every_slot() {
        let mut zones = build_zones(Layout::StdAtx, [4, 4]);
        let c = Color::new(10, 20, 30);
        zones[0].fill(c);
        assert!(zones[0].slots.iter().all(|s| s.color == c));
    }

    #[test]
    fn resize_slots_renumbers() {
        let mut zones = build_zones(Layout::StdAtx, DEFAULT_STRIPS);
        zones[2].resize_slots(3);
        assert_eq!(zones[2].slots.len(), 3);
        assert_eq!(zones[2].slots[2].index, 2);
        assert_eq!(zones[2].slots[2].name, "Back I/O 3");
    }
}
