//! Driver lifecycle — owned connection, rescan, host-facing contract.
//!
//! One driver instance owns at most one live connection. Discovery and
//! pushes are synchronous and must be externally single-flighted; the
//! stream itself sits behind a mutex so concurrent pushes to different
//! zones still serialize on the wire.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::boards::{BoardInfo, Layout, resolve_layout};
use crate::color::Color;
use crate::device::{self, RgbStream};
use crate::error::Result;
use crate::profiles::Addressing;
use crate::protocol::{CMD_INIT, CMD_LED_COUNT};
use crate::push;
use crate::report::FeatureReport;
use crate::topology::{Zone, build_zones};

/// Name reported to the host when the board product is unknown.
const DEFAULT_NAME: &str = "Aorus";

/// Host-tunable configuration: LED counts for the two ARGB strip headers.
/// In-memory only; a change takes effect on the next rescan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    pub argb1_leds: u16,
    pub argb2_leds: u16,
}

impl Default for DriverConfig {
    fn default() -> Self {
        // Smallest strip tier the chip reports.
        DriverConfig {
            argb1_leds: 32,
            argb2_leds: 32,
        }
    }
}

/// What this driver can do for the host.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Capabilities {
    pub supports_push: bool,
    pub supports_pull: bool,
    pub supports_custom_override: bool,
    pub is_color_source: bool,
}

/// Capability descriptor for the host's feature negotiation.
pub fn capabilities() -> Capabilities {
    Capabilities {
        supports_push: true,
        supports_pull: false,
        supports_custom_override: true,
        is_color_source: false,
    }
}

/// Host-supplied device specification for the generic override path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeviceSpec {
    pub led_count: usize,
}

/// Rebuild a zone's slots from a host device specification.
///
/// Only strip zones take an override — Single and Composite slot counts
/// are fixed by their address lists.
pub fn apply_device_override(zone: &mut Zone, spec: DeviceSpec) {
    if matches!(zone.addressing, Addressing::Strip(_)) {
        zone.resize_slots(spec.led_count.max(1));
    }
}

/// An opened, calibrated stream. The mutex serializes every wire access.
struct Connection {
    stream: Mutex<Box<dyn RgbStream + Send>>,
}

/// Driver instance: owns the connection, identity, and zone list.
pub struct Driver {
    config: DriverConfig,
    dirty: bool,
    board: BoardInfo,
    connection: Option<Connection>,
    identity: Option<FeatureReport>,
    layout: Option<Layout>,
    zones: Vec<Zone>,
}

impl Driver {
    /// Driver with board identity read from the running system.
    pub fn new() -> Driver {
        Driver::with_board(BoardInfo::detect())
    }

    /// Driver with explicit board identity (tests, remote hosts).
    pub fn with_board(board: BoardInfo) -> Driver {
        Driver {
            config: DriverConfig::default(),
            dirty: false,
            board,
            connection: None,
            identity: None,
            layout: None,
            zones: Vec::new(),
        }
    }

    /// Full discovery pass against the real HID layer.
    ///
    /// Returns the complete new zone list (full replace — callers diff if
    /// they need add/remove semantics). Absence of the controller, and
    /// HID-layer failures during acquisition, yield an empty list; a
    /// malformed identity report is an error and aborts the pass.
    pub fn rescan(&mut self) -> Result<&[Zone]> {
        self.release();

        let api = match hidapi::HidApi::new() {
            Ok(api) => api,
            Err(e) => {
                log::warn!("HID enumeration unavailable: {e}");
                return Ok(&self.zones);
            }
        };
        match device::acquire(&api) {
            Some(stream) => self.attach(Box::new(stream)),
            None => Ok(&self.zones),
        }
    }

    /// Discovery pass over an already-acquired stream.
    ///
    /// Fetches and decodes the identity report, issues the LED-count-set
    /// and init commands (in that order), resolves the board, and builds
    /// the zone list. The dirty flag clears: the current config is now
    /// reflected in the topology.
    pub fn attach(&mut self, stream: Box<dyn RgbStream + Send>) -> Result<&[Zone]> {
        self.release();

        let raw = stream.fetch_feature_report()?;
        let identity = FeatureReport::decode(&raw).inspect_err(|e| {
            log::error!("discovery aborted, bad identity report from {}: {e}", stream.path());
        })?;

        stream.send_command(CMD_LED_COUNT, identity.led_count().code())?;
        stream.send_command(CMD_INIT, 0)?;

        let layout = resolve_layout(&identity.product_name, &self.board.product);
        log::debug!(
            "chip '{}' on board '{}' resolved to layout {layout}",
            identity.product_name,
            self.board.product
        );

        self.zones = build_zones(
            layout,
            [self.config.argb1_leds as usize, self.config.argb2_leds as usize],
        );
        self.identity = Some(identity);
        self.layout = Some(layout);
        self.connection = Some(Connection {
            stream: Mutex::new(stream),
        });
        self.dirty = false;
        Ok(&self.zones)
    }

    /// Drop the connection and forget the previous discovery results.
    pub fn release(&mut self) {
        self.connection = None;
        self.identity = None;
        self.layout = None;
        self.zones.clear();
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    // ── zone access ──

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone_mut(&mut self, index: usize) -> Option<&mut Zone> {
        self.zones.get_mut(index)
    }

    /// Set one slot color. Does not touch the wire; call [`Driver::push`].
    pub fn set_color(&mut self, zone: usize, slot: usize, color: Color) {
        if let Some(z) = self.zones.get_mut(zone) {
            z.set_color(slot, color);
        }
    }

    // ── wire operations ──

    /// Encode and send one zone's current colors.
    pub fn push(&self, zone_index: usize) -> Result<()> {
        let conn = self
            .connection
            .as_ref()
            .ok_or(device::DeviceError::NotFound)?;
        let zone = self
            .zones
            .get(zone_index)
            .ok_or_else(|| device::DeviceError::WriteFailed(format!("no zone {zone_index}")))?;
        let stream = conn.stream.lock().expect("stream mutex poisoned");
        push::push_zone(stream.as_ref(), zone)?;
        Ok(())
    }

    /// Push every zone, stopping at the first wire failure.
    pub fn push_all(&self) -> Result<()> {
        for i in 0..self.zones.len() {
            self.push(i)?;
        }
        Ok(())
    }

    /// Reading colors back is unsupported; always succeeds, does nothing.
    pub fn pull(&self, _zone_index: usize) -> Result<()> {
        Ok(())
    }

    // ── configuration ──

    pub fn config(&self) -> DriverConfig {
        self.config
    }

    /// Replace the config wholesale (typed host surface). Marks dirty.
    pub fn put_config(&mut self, config: DriverConfig) {
        if config != self.config {
            self.config = config;
            self.dirty = true;
        }
    }

    /// Update the strip header LED counts from the external configuration
    /// surface. Non-numeric input discards the whole update silently —
    /// no dirty flag, no error. Zones are rebuilt on the next rescan.
    pub fn set_led_counts(&mut self, argb1: &str, argb2: &str) {
        let (Ok(argb1), Ok(argb2)) = (argb1.trim().parse(), argb2.trim().parse()) else {
            return;
        };
        self.put_config(DriverConfig {
            argb1_leds: argb1,
            argb2_leds: argb2,
        });
    }

    /// True when the config changed after the last topology build.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    // ── identity ──

    pub fn identity(&self) -> Option<&FeatureReport> {
        self.identity.as_ref()
    }

    pub fn layout(&self) -> Option<Layout> {
        self.layout
    }

    pub fn board(&self) -> &BoardInfo {
        &self.board
    }

    /// Display name for the host: the DMI board product when known.
    pub fn name(&self) -> &str {
        if self.board.product.is_empty() {
            DEFAULT_NAME
        } else {
            &self.board.product
        }
    }
}

impl Default for Driver {
    fn default() -> Self {
        Driver::new()
    }
}
