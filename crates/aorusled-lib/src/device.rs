//! HID stream access — trait seam, hidapi backend, candidate acquisition.

use std::fmt;
use std::thread;
use std::time::Duration;

use serde::Serialize;

use crate::protocol::{
    self, PACKET_SIZE, PRODUCT_IDS, REPORT_ID, REPORT_SIZE, RETRY_BACKOFF_MS, VENDOR_ID,
};

// ── Error type ──

/// Device communication errors.
///
/// String payloads follow the convention **"context: details"** where
/// *context* identifies the operation or step (e.g. `"HID open"`, `"wake"`)
/// and *details* describes what went wrong.
#[derive(Debug)]
pub enum DeviceError {
    NotFound,
    OpenFailed(String),
    InitFailed(String),
    WriteFailed(String),
    ReadFailed(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::NotFound => write!(f, "IT8297 controller not found"),
            DeviceError::OpenFailed(e) => write!(f, "Failed to open device: {e}"),
            DeviceError::InitFailed(e) => write!(f, "Device init failed: {e}"),
            DeviceError::WriteFailed(e) => write!(f, "Report write failed: {e}"),
            DeviceError::ReadFailed(e) => write!(f, "Report read failed: {e}"),
        }
    }
}

impl std::error::Error for DeviceError {}

pub type Result<T> = std::result::Result<T, DeviceError>;

// ── Candidate info ──

/// One HID interface matching the controller's vendor/product identity.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateInfo {
    pub path: String,
    pub vendor_id: u16,
    pub product_id: u16,
    /// USB product string, when the HID layer exposes one.
    pub product: Option<String>,
}

// ── Trait ──

/// A calibrated byte stream to one physical controller.
///
/// The seam between driver logic and the HID layer: production code uses
/// [`HidStream`], tests use [`mock::MockStream`].
pub trait RgbStream {
    /// Diagnostic identifier (platform device path, or `mock://...`).
    fn path(&self) -> &str;

    /// Send one 64-byte command packet.
    fn send_packet(&self, packet: &[u8; PACKET_SIZE]) -> Result<()>;

    /// Fetch the identity feature report. The returned buffer may be
    /// shorter than [`REPORT_SIZE`]; length validation is the codec's job.
    fn fetch_feature_report(&self) -> Result<Vec<u8>>;

    /// Send a short command `[0xCC, opcode, unit, 0...]`.
    fn send_command(&self, opcode: u8, unit: u8) -> Result<()> {
        self.send_packet(&protocol::build_command(opcode, unit))
    }
}

// ── hidapi implementation ──

/// hidapi-backed stream. One instance per opened controller.
pub struct HidStream {
    device: hidapi::HidDevice,
    path: String,
}

impl RgbStream for HidStream {
    fn path(&self) -> &str {
        &self.path
    }

    fn send_packet(&self, packet: &[u8; PACKET_SIZE]) -> Result<()> {
        self.device
            .send_feature_report(packet)
            .map_err(|e| DeviceError::WriteFailed(format!("send_feature_report: {e}")))
    }

    fn fetch_feature_report(&self) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; REPORT_SIZE];
        buf[0] = REPORT_ID;
        let n = self
            .device
            .get_feature_report(&mut buf)
            .map_err(|e| DeviceError::ReadFailed(format!("get_feature_report: {e}")))?;
        buf.truncate(n);
        Ok(buf)
    }
}

/// List all HID interfaces matching the controller identity, in
/// enumeration order.
pub fn enumerate_candidates(api: &hidapi::HidApi) -> Vec<CandidateInfo> {
    api.device_list()
        .filter(|d| d.vendor_id() == VENDOR_ID && PRODUCT_IDS.contains(&d.product_id()))
        .map(|d| CandidateInfo {
            path: d.path().to_string_lossy().into_owned(),
            vendor_id: d.vendor_id(),
            product_id: d.product_id(),
            product: d.product_string().map(str::to_owned),
        })
        .collect()
}

/// Candidate listing against the live HID layer. An unavailable HID
/// layer logs a warning and reports no candidates.
pub fn list_candidates() -> Vec<CandidateInfo> {
    match hidapi::HidApi::new() {
        Ok(api) => enumerate_candidates(&api),
        Err(e) => {
            log::warn!("HID enumeration unavailable: {e}");
            Vec::new()
        }
    }
}

/// Acquire a working stream to the first healthy candidate.
///
/// For each candidate in enumeration order: open, send the calibration
/// packet, send the wake command. A failure anywhere in that sequence logs
/// at warn, waits [`RETRY_BACKOFF_MS`], and moves to the next candidate —
/// one attempt per candidate per pass. No matching device, or every
/// candidate failing, is a legitimate absence (`None`), never an error.
pub fn acquire(api: &hidapi::HidApi) -> Option<HidStream> {
    let candidates: Vec<_> = api
        .device_list()
        .filter(|d| d.vendor_id() == VENDOR_ID && PRODUCT_IDS.contains(&d.product_id()))
        .collect();

    if candidates.is_empty() {
        log::debug!("no IT8297 candidates present");
        return None;
    }

    for (i, info) in candidates.iter().enumerate() {
        let path = info.path().to_string_lossy().into_owned();
        log::debug!(
            "trying connection {i}: {path} ({})",
            info.product_string().unwrap_or("no product string")
        );
        match open_candidate(api, info, path) {
            Ok(stream) => return Some(stream),
            Err(e) => {
                log::warn!("candidate {i} failed: {e}");
                thread::sleep(Duration::from_millis(RETRY_BACKOFF_MS));
            }
        }
    }
    None
}

fn open_candidate(
    api: &hidapi::HidApi,
    info: &hidapi::DeviceInfo,
    path: String,
) -> Result<HidStream> {
    let device = info
        .open_device(api)
        .map_err(|e| DeviceError::OpenFailed(format!("HID open: {e}")))?;
    let stream = HidStream { device, path };
    stream
        .send_command(protocol::CMD_CALIBRATE, 0)
        .map_err(|e| DeviceError::InitFailed(format!("calibrate: {e}")))?;
    stream
        .send_command(protocol::CMD_WAKE, 0)
        .map_err(|e| DeviceError::InitFailed(format!("wake: {e}")))?;
    Ok(stream)
}

// ── Mock stream for testing ──

/// In-memory mock stream for unit and integration tests.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::protocol::{OFF_CHIP_ID, OFF_NAME, OFF_TOTAL_LEDS};

    #[derive(Default)]
    struct Inner {
        /// Every packet sent, in order.
        packets: Mutex<Vec<[u8; PACKET_SIZE]>>,
        /// Scripted feature report responses, consumed front-first.
        /// The last response is repeated once the queue drains.
        feature_reports: Mutex<Vec<Vec<u8>>>,
        fail_send: AtomicBool,
        fail_fetch: AtomicBool,
    }

    /// Records every packet sent; serves scripted feature reports.
    ///
    /// Clones share state, so a test can keep a probe handle after moving
    /// the stream into a driver.
    #[derive(Clone, Default)]
    pub struct MockStream {
        inner: Arc<Inner>,
    }

    impl MockStream {
        pub fn new() -> Self {
            Self::default()
        }

        /// A mock whose feature report carries the given product name.
        pub fn with_product_name(name: &str) -> Self {
            let stream = Self::new();
            stream.push_feature_report(raw_report(name));
            stream
        }

        /// Queue a raw feature report response.
        pub fn push_feature_report(&self, report: Vec<u8>) {
            self.inner.feature_reports.lock().unwrap().push(report);
        }

        /// If true, `send_packet` returns an error.
        pub fn set_fail_send(&self, fail: bool) {
            self.inner.fail_send.store(fail, Ordering::SeqCst);
        }

        /// If true, `fetch_feature_report` returns an error.
        pub fn set_fail_fetch(&self, fail: bool) {
            self.inner.fail_fetch.store(fail, Ordering::SeqCst);
        }

        /// Every packet sent so far, in order.
        pub fn packets(&self) -> Vec<[u8; PACKET_SIZE]> {
            self.inner.packets.lock().unwrap().clone()
        }

        /// `(opcode, unit)` of every packet sent so far.
        pub fn commands(&self) -> Vec<(u8, u8)> {
            self.packets().iter().map(|p| (p[1], p[2])).collect()
        }

        pub fn clear_packets(&self) {
            self.inner.packets.lock().unwrap().clear();
        }
    }

    /// A plausible raw identity report with `name` embedded.
    pub fn raw_report(name: &str) -> Vec<u8> {
        let mut buf = vec![0u8; REPORT_SIZE];
        buf[0] = REPORT_ID;
        buf[OFF_TOTAL_LEDS] = 1;
        let bytes = name.as_bytes();
        let n = bytes.len().min(crate::protocol::NAME_LEN);
        buf[OFF_NAME..OFF_NAME + n].copy_from_slice(&bytes[..n]);
        buf[OFF_CHIP_ID..OFF_CHIP_ID + 4].copy_from_slice(&0x8297u32.to_le_bytes());
        buf
    }

    impl RgbStream for MockStream {
        fn path(&self) -> &str {
            "mock://it8297"
        }

        fn send_packet(&self, packet: &[u8; PACKET_SIZE]) -> Result<()> {
            if self.inner.fail_send.load(Ordering::SeqCst) {
                return Err(DeviceError::WriteFailed(
                    "mock: send failure injected".into(),
                ));
            }
            self.inner.packets.lock().unwrap().push(*packet);
            Ok(())
        }

        fn fetch_feature_report(&self) -> Result<Vec<u8>> {
            if self.inner.fail_fetch.load(Ordering::SeqCst) {
                return Err(DeviceError::ReadFailed(
                    "mock: fetch failure injected".into(),
                ));
            }
            let mut reports = self.inner.feature_reports.lock().unwrap();
            match reports.len() {
                0 => Err(DeviceError::ReadFailed("mock: no report scripted".into())),
                1 => Ok(reports[0].clone()),
                _ => Ok(reports.remove(0)),
            }
        }
    }
}
