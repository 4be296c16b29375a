//! Color push encoding — zone state to IT8297 wire packets.
//!
//! Dispatch is by the zone's addressing mode. Channel reordering happens
//! here and only here; stored colors are never mutated.

use crate::device::{Result, RgbStream};
use crate::profiles::Addressing;
use crate::protocol::{
    APPLY_ALL_ZONES, CMD_APPLY, EFFECT_MAX_BRIGHTNESS, EFFECT_STATIC, EFX_OFF_COLOR,
    EFX_OFF_HEADER, EFX_OFF_MAX_BRIGHTNESS, EFX_OFF_TYPE, EFX_OFF_ZONE_MASK, HDR_ZONE_BASE,
    PACKET_SIZE, REPORT_ID, STRIP_LEDS_PER_PACKET, STRIP_OFF_COUNT, STRIP_OFF_DATA,
    STRIP_OFF_OFFSET,
};
use crate::topology::Zone;

/// Build a static-color effect packet for one 12V header address.
///
/// `color` is already in the zone's wire channel order.
pub fn build_effect_packet(address: u8, color: [u8; 3]) -> [u8; PACKET_SIZE] {
    debug_assert!(
        (HDR_ZONE_BASE..HDR_ZONE_BASE + 8).contains(&address),
        "effect address 0x{address:02X} outside zone header range"
    );
    let mut pkt = [0u8; PACKET_SIZE];
    pkt[0] = REPORT_ID;
    pkt[EFX_OFF_HEADER] = address;
    let mask = 1u32 << (address - HDR_ZONE_BASE);
    pkt[EFX_OFF_ZONE_MASK..EFX_OFF_ZONE_MASK + 4].copy_from_slice(&mask.to_le_bytes());
    pkt[EFX_OFF_TYPE] = EFFECT_STATIC;
    pkt[EFX_OFF_MAX_BRIGHTNESS] = EFFECT_MAX_BRIGHTNESS;
    pkt[EFX_OFF_COLOR..EFX_OFF_COLOR + 3].copy_from_slice(&color);
    pkt
}

/// Chunk a strip's flattened color bytes into data packets for `header`.
///
/// Each packet carries up to [`STRIP_LEDS_PER_PACKET`] LEDs and the
/// little-endian byte offset of its first color byte.
pub fn build_strip_packets(header: u8, data: &[u8]) -> Vec<[u8; PACKET_SIZE]> {
    let chunk_bytes = STRIP_LEDS_PER_PACKET * 3;
    data.chunks(chunk_bytes)
        .enumerate()
        .map(|(i, chunk)| {
            let mut pkt = [0u8; PACKET_SIZE];
            pkt[0] = REPORT_ID;
            pkt[1] = header;
            let offset = (i * chunk_bytes) as u16;
            pkt[STRIP_OFF_OFFSET..STRIP_OFF_OFFSET + 2].copy_from_slice(&offset.to_le_bytes());
            pkt[STRIP_OFF_COUNT] = chunk.len() as u8;
            pkt[STRIP_OFF_DATA..STRIP_OFF_DATA + chunk.len()].copy_from_slice(chunk);
            pkt
        })
        .collect()
}

/// Encode and send the zone's current slot colors.
///
/// - `Strip`: one logical write — the whole reordered color sequence in
///   chunked data packets, then an apply.
/// - `Single`: one effect packet at the base address, then an apply.
/// - `Composite`: one effect packet per slot at `addresses[i]`, then one
///   apply for the series. The address list matching the slot count is a
///   build-time invariant, not a runtime condition.
pub fn push_zone(stream: &dyn RgbStream, zone: &Zone) -> Result<()> {
    match zone.addressing {
        Addressing::Single(address) => {
            let color = zone.channel_order.reorder(zone.slots[0].color);
            stream.send_packet(&build_effect_packet(address, color))?;
        }
        Addressing::Composite(addresses) => {
            debug_assert_eq!(
                addresses.len(),
                zone.slots.len(),
                "{}: composite address list out of step with slots",
                zone.name
            );
            for (slot, &address) in zone.slots.iter().zip(addresses) {
                let color = zone.channel_order.reorder(slot.color);
                stream.send_packet(&build_effect_packet(address, color))?;
            }
        }
        Addressing::Strip(header) => {
            let data: Vec<u8> = zone
                .slots
                .iter()
                .flat_map(|s| zone.channel_order.reorder(s.color))
                .collect();
            for pkt in build_strip_packets(header, &data) {
                stream.send_packet(&pkt)?;
            }
        }
    }
    stream.send_command(CMD_APPLY, APPLY_ALL_ZONES)
}

/// Reading colors back from the chip is unsupported; pull is a no-op.
pub fn pull_zone(_stream: &dyn RgbStream, _zone: &Zone) -> Result<()> {
    Ok(())
}
