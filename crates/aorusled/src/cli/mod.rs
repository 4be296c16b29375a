//! CLI subcommands — device listing, discovery probe, zone pushes, config.

mod config_cmd;
mod devices;
mod probe;
mod set;

use clap::Subcommand;
use serde::Serialize;

pub(super) use aorusled_lib::device::CandidateInfo;
pub(super) use aorusled_lib::driver::{Capabilities, Driver, DriverConfig};
pub(super) use aorusled_lib::error::Result;

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
pub(super) fn kv_width(keys: &[&str]) -> usize {
    keys.iter().map(|k| k.len()).max().unwrap_or(0) + PADDING
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{key:<width$}{value}", width = w);
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct DevicesOutput {
    pub count: usize,
    pub devices: Vec<CandidateInfo>,
}

#[derive(Serialize)]
pub(super) struct ProbeOutput {
    pub name: String,
    pub chip_product_name: String,
    pub firmware: String,
    pub chip_id: u32,
    pub led_count: String,
    pub layout: String,
    pub zones: Vec<ZoneJson>,
}

#[derive(Serialize)]
pub(super) struct ZoneJson {
    pub index: usize,
    pub name: String,
    pub mode: String,
    pub channel_order: String,
    pub leds: usize,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub settings: DriverConfig,
    pub dirty: bool,
    pub capabilities: Capabilities,
}

#[derive(Subcommand)]
pub enum Command {
    /// List HID interfaces matching the IT8297 controller identity
    Devices,

    /// Discover the controller and print identity, layout, and zones
    Probe,

    /// Set a zone to a color and push it to the controller
    Set {
        /// Zone index (from `probe`)
        zone: usize,
        /// Color: #RRGGBB or a name (red, green, blue, ...)
        color: String,
        /// Set a single LED slot instead of the whole zone
        #[arg(long)]
        slot: Option<usize>,
    },

    /// Show the driver configuration, or update the strip LED counts
    Config {
        /// ARGB header 1 LED count
        #[arg(long)]
        argb1: Option<String>,
        /// ARGB header 2 LED count
        #[arg(long)]
        argb2: Option<String>,
    },
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, json: bool) -> Result<()> {
    match cmd {
        Command::Devices => devices::cmd_devices(json),
        Command::Probe => probe::cmd_probe(json),
        Command::Set { zone, color, slot } => {
            if json {
                warn_json_unsupported("set");
            }
            set::cmd_set(zone, &color, slot)
        }
        Command::Config { argb1, argb2 } => config_cmd::cmd_config(argb1, argb2, json),
    }
}
