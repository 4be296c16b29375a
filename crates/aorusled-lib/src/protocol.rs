//! Protocol constants for the ITE IT8297 RGB controller.
//!
//! All traffic is 64-byte HID feature reports with report id `0xCC` in
//! byte 0. The chip exposes one feature report for identity (layout below)
//! and accepts command packets on the same report id.
//!
//! ## Cross-board compatibility
//!
//! The following are believed to be universal across IT8297 revisions:
//! - report id, feature report layout, wake/init/apply opcodes
//! - the 0x20–0x27 zone header range for 12V RGB headers
//!
//! The following vary per board and live in the per-board zone maps
//! (`profiles.rs`), not here:
//! - which headers are populated, their channel order, strip lengths

// ── HID identity ──

/// ITE vendor id.
pub const VENDOR_ID: u16 = 0x048D;

/// Candidate product ids for the controller family.
pub const PRODUCT_IDS: &[u16] = &[0x8297];

// ── Packet geometry ──

/// Every report (in and out) is exactly this long.
pub const REPORT_SIZE: usize = 64;

/// Alias for outgoing command packets — same geometry as the feature report.
pub const PACKET_SIZE: usize = REPORT_SIZE;

/// Report id carried in byte 0 of every packet.
pub const REPORT_ID: u8 = 0xCC;

// ── Feature report layout (little-endian scalars) ──

/// `report_id` — u8, echoes [`REPORT_ID`].
pub const OFF_REPORT_ID: usize = 0;

/// `product` — u8 product family code.
pub const OFF_PRODUCT: usize = 1;

/// `device_num` — u8 device index on the board.
pub const OFF_DEVICE_NUM: usize = 2;

/// `total_leds` — u8 coded maximum strip length (see `LedCount`).
pub const OFF_TOTAL_LEDS: usize = 3;

/// `fw_ver` — u32 firmware version.
pub const OFF_FW_VER: usize = 4;

/// `curr_led_count` — u16, chip-reported current strip length code.
pub const OFF_CURR_LED_COUNT: usize = 8;

/// `reserved0` — u16 padding before the name field.
pub const OFF_RESERVED0: usize = 10;

/// ASCII product name, NUL-terminated within the field.
pub const OFF_NAME: usize = 12;

/// Length of the embedded product name field in bytes.
pub const NAME_LEN: usize = 32;

/// `byteorder0` — u32 channel-order calibration for the 12V headers.
pub const OFF_BYTEORDER0: usize = 44;

/// `byteorder1` — u32 channel-order calibration for strip header 1.
pub const OFF_BYTEORDER1: usize = 48;

/// `byteorder2` — u32 channel-order calibration for strip header 2.
pub const OFF_BYTEORDER2: usize = 52;

/// `chip_id` — u32 silicon identifier.
pub const OFF_CHIP_ID: usize = 56;

/// `reserved1` — u32 trailing padding.
pub const OFF_RESERVED1: usize = 60;

// ── Command opcodes (byte 1 of a command packet) ──

/// Apply staged zone effects. Unit byte is a zone bitmask.
pub const CMD_APPLY: u8 = 0x28;

/// Post-report initialization, unit 0.
pub const CMD_INIT: u8 = 0x31;

/// Channel-order calibration, sent once during acquisition.
pub const CMD_CALIBRATE: u8 = 0x33;

/// Set addressable-strip LED count. Unit byte is the coded length.
pub const CMD_LED_COUNT: u8 = 0x34;

/// Wake the controller, unit 0. First command after open.
pub const CMD_WAKE: u8 = 0x60;

/// Apply bitmask covering every zone.
pub const APPLY_ALL_ZONES: u8 = 0xFF;

// ── Zone headers ──

/// First 12V header address; effect packets address 0x20..=0x27.
pub const HDR_ZONE_BASE: u8 = 0x20;

pub const HDR_BACK_IO: u8 = 0x20;
pub const HDR_CPU: u8 = 0x21;
pub const HDR_LED_2: u8 = 0x22;
pub const HDR_PCIE: u8 = 0x23;
pub const HDR_LED_C1C2: u8 = 0x24;
pub const HDR_D_LED1: u8 = 0x25;
pub const HDR_D_LED2: u8 = 0x26;
pub const HDR_LED_7: u8 = 0x27;

/// Addressable strip header 1 (D_LED1 pins, RGB data path).
pub const HDR_D_LED1_RGB: u8 = 0x58;

/// Addressable strip header 2 (D_LED2 pins, RGB data path).
pub const HDR_D_LED2_RGB: u8 = 0x59;

// ── Effect packet layout (Single / Composite writes) ──

/// Zone header byte (0x20..=0x27).
pub const EFX_OFF_HEADER: usize = 1;

/// u32 zone-select mask: `1 << (header - HDR_ZONE_BASE)`.
pub const EFX_OFF_ZONE_MASK: usize = 2;

/// u8 effect type; only [`EFFECT_STATIC`] is emitted.
pub const EFX_OFF_TYPE: usize = 10;

/// u8 maximum brightness (0–100).
pub const EFX_OFF_MAX_BRIGHTNESS: usize = 11;

/// u8 minimum brightness.
pub const EFX_OFF_MIN_BRIGHTNESS: usize = 12;

/// Three color bytes, already in the zone's channel order.
pub const EFX_OFF_COLOR: usize = 13;

/// Static (solid color) effect type.
pub const EFFECT_STATIC: u8 = 1;

/// Full brightness for static pushes.
pub const EFFECT_MAX_BRIGHTNESS: u8 = 100;

// ── Strip data packet layout (addressable-strip writes) ──

/// u16 little-endian byte offset into the strip's color memory.
pub const STRIP_OFF_OFFSET: usize = 2;

/// u8 count of color bytes carried by this packet.
pub const STRIP_OFF_COUNT: usize = 4;

/// First color byte.
pub const STRIP_OFF_DATA: usize = 5;

/// LEDs per strip data packet: 19 × 3 color bytes fit after the header.
pub const STRIP_LEDS_PER_PACKET: usize = 19;

// ── Acquisition timing ──

/// Fixed backoff between connection attempts during discovery.
pub const RETRY_BACKOFF_MS: u64 = 100;

/// Build a short command packet `[0xCC, opcode, unit, 0...]`.
pub fn build_command(opcode: u8, unit: u8) -> [u8; PACKET_SIZE] {
    let mut pkt = [0u8; PACKET_SIZE];
    pkt[0] = REPORT_ID;
    pkt[1] = opcode;
    pkt[2] = unit;
    pkt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_opcodes_distinct() {
        let cmds = [CMD_APPLY, CMD_INIT, CMD_CALIBRATE, CMD_LED_COUNT, CMD_WAKE];
        for i in 0..cmds.len() {
            for j in (i + 1)..cmds.len() {
                assert_ne!(cmds[i], cmds[j], "opcodes at index {i} and {j} collide");
            }
        }
    }

    #[test]
    fn zone_headers_distinct() {
        let hdrs = [
            HDR_BACK_IO,
            HDR_CPU,
            HDR_LED_2,
            HDR_PCIE,
            HDR_LED_C1C2,
            HDR_D_LED1,
            HDR_D_LED2,
            HDR_LED_7,
            HDR_D_LED1_RGB,
            HDR_D_LED2_RGB,
        ];
        for i in 0..hdrs.len() {
            for j in (i + 1)..hdrs.len() {
                assert_ne!(hdrs[i], hdrs[j], "headers at index {i} and {j} collide");
            }
        }
    }

    #[test]
    fn zone_headers_within_effect_range() {
        for hdr in HDR_BACK_IO..=HDR_LED_7 {
            assert!(hdr >= HDR_ZONE_BASE);
            assert!(hdr < HDR_ZONE_BASE + 8, "mask for 0x{hdr:02X} overflows u8");
        }
    }

    #[test]
    fn report_offsets_no_overlap() {
        // fw_ver (u32 at 4) must not run into curr_led_count (u16 at 8)
        const { assert!(OFF_FW_VER + 4 <= OFF_CURR_LED_COUNT) };
        // name field (32 bytes at 12) must not run into byteorder0 (u32 at 44)
        const { assert!(OFF_NAME + NAME_LEN <= OFF_BYTEORDER0) };
        // trailing scalars pack back-to-back up to the report boundary
        const { assert!(OFF_BYTEORDER0 + 4 == OFF_BYTEORDER1) };
        const { assert!(OFF_BYTEORDER1 + 4 == OFF_BYTEORDER2) };
        const { assert!(OFF_BYTEORDER2 + 4 == OFF_CHIP_ID) };
        const { assert!(OFF_CHIP_ID + 4 == OFF_RESERVED1) };
        const { assert!(OFF_RESERVED1 + 4 == REPORT_SIZE) };
    }

    #[test]
    fn strip_packet_fits_report() {
        // header(5) + 19 LEDs × 3 bytes = 62 ≤ 64
        assert!(STRIP_OFF_DATA + STRIP_LEDS_PER_PACKET * 3 <= PACKET_SIZE);
    }

    #[test]
    fn effect_color_fits_report() {
        assert!(EFX_OFF_COLOR + 3 <= PACKET_SIZE);
    }

    #[test]
    fn build_command_shape() {
        let pkt = build_command(CMD_WAKE, 0);
        assert_eq!(pkt[0], REPORT_ID);
        assert_eq!(pkt[1], CMD_WAKE);
        assert_eq!(pkt[2], 0);
        assert!(pkt[3..].iter().all(|&b| b == 0));
    }
}
