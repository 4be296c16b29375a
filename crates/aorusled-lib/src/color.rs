//! Color values and RGB channel permutations.
//!
//! Colors are stored channel-order-agnostic; a zone's [`ChannelOrder`] is
//! applied only when encoding a push, never to the stored value.

use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// All LEDs start black after a topology build.
pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

/// Parse a color string into a [`Color`].
///
/// Accepts:
/// - Hex: `"#FF0000"`, `"FF0000"`, `"#ff0000"`
/// - Named: `"red"`, `"green"`, `"blue"`, `"white"`, `"orange"`, `"yellow"`, `"purple"`, `"cyan"`
pub fn parse_color(s: &str) -> crate::error::Result<Color> {
    let s = s.trim();

    // Named colors
    match s.to_lowercase().as_str() {
        "red" => return Ok(Color::new(0xFF, 0x00, 0x00)),
        "green" => return Ok(Color::new(0x00, 0xFF, 0x00)),
        "blue" => return Ok(Color::new(0x00, 0x00, 0xFF)),
        "white" => return Ok(Color::new(0xFF, 0xFF, 0xFF)),
        "orange" => return Ok(Color::new(0xFF, 0x80, 0x00)),
        "yellow" => return Ok(Color::new(0xFF, 0xFF, 0x00)),
        "purple" => return Ok(Color::new(0x80, 0x00, 0xFF)),
        "cyan" => return Ok(Color::new(0x00, 0xFF, 0xFF)),
        "off" | "black" => return Ok(BLACK),
        _ => {}
    }

    // Hex color
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 {
        return Err(crate::AorusledError::Color(format!(
            "Invalid color: {s} (use #RRGGBB or a color name)"
        )));
    }
    let val = u32::from_str_radix(hex, 16)
        .map_err(|_| crate::AorusledError::Color(format!("Invalid hex color: {s}")))?;
    Ok(Color::new(
        ((val >> 16) & 0xFF) as u8,
        ((val >> 8) & 0xFF) as u8,
        (val & 0xFF) as u8,
    ))
}

/// Format a color as `#RRGGBB`.
pub fn format_color(c: Color) -> String {
    format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)
}

/// Wire order of the three color channels for a zone.
///
/// The name reads as the output byte order: `Grb` emits green, then red,
/// then blue. The variant set is closed — every board entry in the zone
/// maps uses one of these six, so reordering can never fall through to a
/// default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Rbg,
    Brg,
    Bgr,
    Gbr,
    Grb,
}

impl ChannelOrder {
    /// Emit the three channel bytes of `c` in this wire order.
    pub fn reorder(self, c: Color) -> [u8; 3] {
        match self {
            ChannelOrder::Rgb => [c.r, c.g, c.b],
            ChannelOrder::Rbg => [c.r, c.b, c.g],
            ChannelOrder::Brg => [c.b, c.r, c.g],
            ChannelOrder::Bgr => [c.b, c.g, c.r],
            ChannelOrder::Gbr => [c.g, c.b, c.r],
            ChannelOrder::Grb => [c.g, c.r, c.b],
        }
    }

    /// The permutation that undoes this one:
    /// `p.inverse().reorder(p.reorder(c) as Color) == c`.
    pub fn inverse(self) -> ChannelOrder {
        match self {
            ChannelOrder::Rgb => ChannelOrder::Rgb,
            ChannelOrder::Rbg => ChannelOrder::Rbg,
            ChannelOrder::Brg => ChannelOrder::Gbr,
            ChannelOrder::Bgr => ChannelOrder::Bgr,
            ChannelOrder::Gbr => ChannelOrder::Brg,
            ChannelOrder::Grb => ChannelOrder::Grb,
        }
    }

    /// All six permutations, for exhaustive property tests.
    pub const ALL: [ChannelOrder; 6] = [
        ChannelOrder::Rgb,
        ChannelOrder::Rbg,
        ChannelOrder::Brg,
        ChannelOrder::Bgr,
        ChannelOrder::Gbr,
        ChannelOrder::Grb,
    ];
}

impl std::fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChannelOrder::Rgb => "RGB",
            ChannelOrder::Rbg => "RBG",
            ChannelOrder::Brg => "BRG",
            ChannelOrder::Bgr => "BGR",
            ChannelOrder::Gbr => "GBR",
            ChannelOrder::Grb => "GRB",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── reorder ──

    #[test]
    fn reorder_identity() {
        let c = Color::new(10, 20, 30);
        assert_eq!(ChannelOrder::Rgb.reorder(c), [10, 20, 30]);
    }

    #[test]
    fn reorder_grb() {
        // The order name reads as the output byte order.
        let c = Color::new(255, 128, 0);
        assert_eq!(ChannelOrder::Grb.reorder(c), [128, 255, 0]);
    }

    #[test]
    fn reorder_bgr_reverses() {
        let c = Color::new(1, 2, 3);
        assert_eq!(ChannelOrder::Bgr.reorder(c), [3, 2, 1]);
    }

    #[test]
    fn reorder_preserves_stored_color() {
        let c = Color::new(9, 8, 7);
        let _ = ChannelOrder::Brg.reorder(c);
        assert_eq!(c, Color::new(9, 8, 7));
    }

    // ── inverse ──

    #[test]
    fn inverse_round_trips_all_orders() {
        let samples = [
            Color::new(0, 0, 0),
            Color::new(255, 255, 255),
            Color::new(255, 128, 0),
            Color::new(1, 2, 3),
            Color::new(200, 100, 50),
        ];
        for p in ChannelOrder::ALL {
            for c in samples {
                let [a, b, d] = p.reorder(c);
                let once = Color::new(a, b, d);
                let [x, y, z] = p.inverse().reorder(once);
                assert_eq!(
                    Color::new(x, y, z),
                    c,
                    "inverse({p}) failed to undo {p} for {c:?}"
                );
            }
        }
    }

    #[test]
    fn inverse_is_involutive() {
        for p in ChannelOrder::ALL {
            assert_eq!(p.inverse().inverse(), p);
        }
    }

    // ── parse_color / format_color ──

    #[test]
    fn parse_named() {
        assert_eq!(parse_color("red").unwrap(), Color::new(255, 0, 0));
        assert_eq!(parse_color("  CYAN ").unwrap(), Color::new(0, 255, 255));
        assert_eq!(parse_color("off").unwrap(), BLACK);
    }

    #[test]
    fn parse_hex() {
        assert_eq!(parse_color("#FF8000").unwrap(), Color::new(255, 128, 0));
        assert_eq!(parse_color("abcdef").unwrap(), Color::new(0xAB, 0xCD, 0xEF));
    }

    #[test]
    fn parse_invalid() {
        assert!(parse_color("#FFF").is_err());
        assert!(parse_color("chartreuse").is_err());
        assert!(parse_color("#GGHHII").is_err());
    }

    #[test]
    fn parse_format_roundtrip() {
        let c = parse_color("#AB12CD").unwrap();
        assert_eq!(format_color(c), "#AB12CD");
        assert_eq!(parse_color(&format_color(c)).unwrap(), c);
    }
}
