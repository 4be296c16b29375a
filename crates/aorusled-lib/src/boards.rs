//! Board identity — firmware-table strings, layout tags, resolution.
//!
//! The chip-reported product name and the board's DMI product string
//! disagree on some boards (rebadged chips, ambiguous names), so
//! resolution is two-stage: a name table with a guaranteed-hit fallback,
//! then an unconditional board-product override table. Both tables are
//! immutable data — adding a board means adding a row, not a branch.

use serde::Serialize;

/// Canonical physical-layout profile for a board family. Closed set;
/// values come only from table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Layout {
    /// Standard ATX: two ARGB strip headers plus four 12V zones.
    StdAtx,
    /// ITX: single ARGB strip header.
    Itx,
    /// Mini-ITX variant with a composite backlight block.
    MiniItx,
    /// Z390 Aorus Master/Ultra: VRM strip plus the full 12V header bank.
    Z390,
    /// Conservative map used when the chip name is unrecognized.
    Fallback,
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Layout::StdAtx => "STD_ATX",
            Layout::Itx => "ITX",
            Layout::MiniItx => "MINI_ITX",
            Layout::Z390 => "390",
            Layout::Fallback => "FALLBACK",
        };
        write!(f, "{s}")
    }
}

/// Substituted for unrecognized chip names before the table lookup.
/// The table always carries this entry, so resolution is total.
pub const FALLBACK_NAME: &str = "IT8297BX-GBX570";

/// Chip-reported product name → layout.
static CHIP_NAME_LAYOUTS: &[(&str, Layout)] = &[
    ("B550 AORUS PRO", Layout::StdAtx),
    ("B550 AORUS ELITE", Layout::StdAtx),
    ("X570 AORUS ELITE", Layout::StdAtx),
    ("X570 AORUS PRO WIFI", Layout::StdAtx),
    ("X570 AORUS ULTRA", Layout::StdAtx),
    ("B550I AORUS PRO AX", Layout::Itx),
    ("X570 I AORUS PRO WIFI", Layout::Itx),
    (FALLBACK_NAME, Layout::Fallback),
];

/// DMI board product → layout. Takes precedence over the name table
/// unconditionally; covers boards whose chip-reported name is wrong or
/// shared with a different physical layout.
static BOARD_PRODUCT_OVERRIDES: &[(&str, Layout)] = &[
    ("X570 I AORUS PRO WIFI", Layout::MiniItx),
    ("Z390 AORUS MASTER-CF", Layout::Z390),
    ("Z390 AORUS ULTRA-CF", Layout::Z390),
];

/// Resolve a board to its layout profile. Deterministic and total.
pub fn resolve_layout(chip_name: &str, board_product: &str) -> Layout {
    let name = if CHIP_NAME_LAYOUTS.iter().any(|(n, _)| *n == chip_name) {
        chip_name
    } else {
        FALLBACK_NAME
    };
    let mut layout = CHIP_NAME_LAYOUTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, l)| *l)
        .expect("fallback entry must exist in the chip name table");

    if let Some((_, over)) = BOARD_PRODUCT_OVERRIDES
        .iter()
        .find(|(p, _)| *p == board_product)
    {
        layout = *over;
    }
    layout
}

// ── Board identity strings ──

/// Identity strings read from the platform firmware tables. Opaque lookup
/// keys only — never parsed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoardInfo {
    pub manufacturer: String,
    pub model: String,
    pub part_number: String,
    pub product: String,
    pub system_name: String,
}

impl BoardInfo {
    /// Read board identity from the running system.
    ///
    /// Linux reads the DMI sysfs entries; other platforms report empty
    /// strings, which resolve through the fallback path.
    pub fn detect() -> BoardInfo {
        #[cfg(target_os = "linux")]
        {
            fn dmi(key: &str) -> String {
                std::fs::read_to_string(format!("/sys/class/dmi/id/{key}"))
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default()
            }
            BoardInfo {
                manufacturer: dmi("board_vendor"),
                model: dmi("product_name"),
                part_number: dmi("board_version"),
                product: dmi("board_name"),
                system_name: std::fs::read_to_string("/proc/sys/kernel/hostname")
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default(),
            }
        }
        #[cfg(not(target_os = "linux"))]
        {
            BoardInfo::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── name table ──

    #[test]
    fn known_names_resolve() {
        assert_eq!(resolve_layout("B550 AORUS PRO", ""), Layout::StdAtx);
        assert_eq!(resolve_layout("B550I AORUS PRO AX", ""), Layout::Itx);
        assert_eq!(resolve_layout(FALLBACK_NAME, ""), Layout::Fallback);
    }

    #[test]
    fn unknown_name_falls_back() {
        assert_eq!(resolve_layout("NOT A BOARD", ""), Layout::Fallback);
        assert_eq!(resolve_layout("", ""), Layout::Fallback);
    }

    #[test]
    fn resolution_is_total_over_arbitrary_input() {
        // Any name at all must produce a layout.
        for name in ["", "\0\0", "Z490 VISION G", "ÿ漢字"] {
            let _ = resolve_layout(name, "");
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        for (name, _) in CHIP_NAME_LAYOUTS {
            assert_eq!(resolve_layout(name, ""), resolve_layout(name, ""));
        }
    }

    // ── override table ──

    #[test]
    fn board_product_override_wins() {
        // Chip name says ITX, board product forces Mini-ITX.
        assert_eq!(
            resolve_layout("X570 I AORUS PRO WIFI", "X570 I AORUS PRO WIFI"),
            Layout::MiniItx
        );
    }

    #[test]
    fn z390_override_ignores_chip_name() {
        // The Z390 boards report an unrelated or fallback chip name.
        assert_eq!(
            resolve_layout("B550 AORUS PRO", "Z390 AORUS MASTER-CF"),
            Layout::Z390
        );
        assert_eq!(
            resolve_layout("garbage", "Z390 AORUS ULTRA-CF"),
            Layout::Z390
        );
    }

    #[test]
    fn unknown_board_product_is_ignored() {
        assert_eq!(
            resolve_layout("B550 AORUS PRO", "SOME OEM BOARD"),
            Layout::StdAtx
        );
    }

    // ── BoardInfo ──

    #[test]
    fn detect_does_not_panic() {
        let info = BoardInfo::detect();
        // Strings may be empty on non-Gigabyte or non-Linux hosts.
        let _ = info.product.len();
    }
}
