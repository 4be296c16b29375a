//! Feature report codec — decodes the chip's 64-byte identity report.
//!
//! The report carries the chip/firmware identity and an embedded ASCII
//! product name used for board resolution. Decoding is a pure transform;
//! the only failure is a buffer shorter than [`protocol::REPORT_SIZE`].

use std::fmt;

use crate::error::{AorusledError, Result};
use crate::protocol::{
    NAME_LEN, OFF_BYTEORDER0, OFF_BYTEORDER1, OFF_BYTEORDER2, OFF_CHIP_ID, OFF_CURR_LED_COUNT,
    OFF_DEVICE_NUM, OFF_FW_VER, OFF_NAME, OFF_PRODUCT, OFF_REPORT_ID, OFF_RESERVED0,
    OFF_RESERVED1, OFF_TOTAL_LEDS, REPORT_SIZE,
};

/// Coded maximum addressable-strip length reported in `total_leds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedCount {
    Leds32,
    Leds64,
    Leds256,
    Leds512,
    Leds1024,
    Unknown(u8),
}

impl LedCount {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => LedCount::Leds32,
            1 => LedCount::Leds64,
            2 => LedCount::Leds256,
            3 => LedCount::Leds512,
            4 => LedCount::Leds1024,
            other => LedCount::Unknown(other),
        }
    }

    /// The raw code, echoed back in the LED-count-set command.
    pub fn code(self) -> u8 {
        match self {
            LedCount::Leds32 => 0,
            LedCount::Leds64 => 1,
            LedCount::Leds256 => 2,
            LedCount::Leds512 => 3,
            LedCount::Leds1024 => 4,
            LedCount::Unknown(code) => code,
        }
    }

    /// Number of LEDs, when the code is a known tier.
    pub fn leds(self) -> Option<u32> {
        match self {
            LedCount::Leds32 => Some(32),
            LedCount::Leds64 => Some(64),
            LedCount::Leds256 => Some(256),
            LedCount::Leds512 => Some(512),
            LedCount::Leds1024 => Some(1024),
            LedCount::Unknown(_) => None,
        }
    }
}

impl fmt::Display for LedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.leds() {
            Some(n) => write!(f, "{n}"),
            None => write!(f, "unknown (code {})", self.code()),
        }
    }
}

/// Decoded chip identity report. Immutable once decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureReport {
    pub report_id: u8,
    pub product: u8,
    pub device_num: u8,
    pub total_leds: u8,
    pub fw_ver: u32,
    pub curr_led_count: u16,
    pub reserved0: u16,
    /// Product name from bytes 12..44, truncated at the first NUL.
    /// Empty is valid.
    pub product_name: String,
    pub byteorder0: u32,
    pub byteorder1: u32,
    pub byteorder2: u32,
    pub chip_id: u32,
    pub reserved1: u32,
}

fn read_u16(buf: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([buf[off], buf[off + 1]])
}

fn read_u32(buf: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([buf[off], buf[off + 1], buf[off + 2], buf[off + 3]])
}

/// Decode a NUL-terminated name from the fixed-width report field.
fn parse_product_name(name_bytes: &[u8]) -> String {
    let end = name_bytes
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(name_bytes.len());
    String::from_utf8_lossy(&name_bytes[..end]).to_string()
}

impl FeatureReport {
    /// Decode a raw feature report buffer.
    ///
    /// Fails only if the buffer is shorter than [`REPORT_SIZE`]; extra
    /// trailing bytes are ignored.
    pub fn decode(buf: &[u8]) -> Result<FeatureReport> {
        if buf.len() < REPORT_SIZE {
            return Err(AorusledError::Report(format!(
                "feature report too short: got {} bytes, need {REPORT_SIZE}",
                buf.len()
            )));
        }
        Ok(FeatureReport {
            report_id: buf[OFF_REPORT_ID],
            product: buf[OFF_PRODUCT],
            device_num: buf[OFF_DEVICE_NUM],
            total_leds: buf[OFF_TOTAL_LEDS],
            fw_ver: read_u32(buf, OFF_FW_VER),
            curr_led_count: read_u16(buf, OFF_CURR_LED_COUNT),
            reserved0: read_u16(buf, OFF_RESERVED0),
            product_name: parse_product_name(&buf[OFF_NAME..OFF_NAME + NAME_LEN]),
            byteorder0: read_u32(buf, OFF_BYTEORDER0),
            byteorder1: read_u32(buf, OFF_BYTEORDER1),
            byteorder2: read_u32(buf, OFF_BYTEORDER2),
            chip_id: read_u32(buf, OFF_CHIP_ID),
            reserved1: read_u32(buf, OFF_RESERVED1),
        })
    }

    /// Re-encode the report into its wire layout.
    ///
    /// The product name is written NUL-padded; names longer than the field
    /// are truncated to [`NAME_LEN`] bytes.
    pub fn encode(&self) -> [u8; REPORT_SIZE] {
        let mut buf = [0u8; REPORT_SIZE];
        buf[OFF_REPORT_ID] = self.report_id;
        buf[OFF_PRODUCT] = self.product;
        buf[OFF_DEVICE_NUM] = self.device_num;
        buf[OFF_TOTAL_LEDS] = self.total_leds;
        buf[OFF_FW_VER..OFF_FW_VER + 4].copy_from_slice(&self.fw_ver.to_le_bytes());
        buf[OFF_CURR_LED_COUNT..OFF_CURR_LED_COUNT + 2]
            .copy_from_slice(&self.curr_led_count.to_le_bytes());
        buf[OFF_RESERVED0..OFF_RESERVED0 + 2].copy_from_slice(&self.reserved0.to_le_bytes());
        let name = self.product_name.as_bytes();
        let n = name.len().min(NAME_LEN);
        buf[OFF_NAME..OFF_NAME + n].copy_from_slice(&name[..n]);
        buf[OFF_BYTEORDER0..OFF_BYTEORDER0 + 4].copy_from_slice(&self.byteorder0.to_le_bytes());
        buf[OFF_BYTEORDER1..OFF_BYTEORDER1 + 4].copy_from_slice(&self.byteorder1.to_le_bytes());
        buf[OFF_BYTEORDER2..OFF_BYTEORDER2 + 4].copy_from_slice(&self.byteorder2.to_le_bytes());
        buf[OFF_CHIP_ID..OFF_CHIP_ID + 4].copy_from_slice(&self.chip_id.to_le_bytes());
        buf[OFF_RESERVED1..OFF_RESERVED1 + 4].copy_from_slice(&self.reserved1.to_le_bytes());
        buf
    }

    /// Coded maximum strip length.
    pub fn led_count(&self) -> LedCount {
        LedCount::from_code(self.total_leds)
    }

    /// Firmware version as `major.minor.patch.build` from the packed u32.
    pub fn firmware(&self) -> String {
        let b = self.fw_ver.to_le_bytes();
        format!("{}.{}.{}.{}", b[0], b[1], b[2], b[3])
    }
}
