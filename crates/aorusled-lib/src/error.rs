//! Unified error type for the aorusled-lib crate.
//!
//! [`AorusledError`] wraps the module-specific `DeviceError` and
//! domain-specific error kinds (`Report`, `Color`). `From` impls allow `?`
//! to propagate across module boundaries seamlessly.

use std::fmt;

use crate::device::DeviceError;

/// Unified error type for aorusled-lib operations.
#[derive(Debug)]
pub enum AorusledError {
    /// Device communication error (open, wake, report I/O).
    Device(DeviceError),
    /// Malformed identity feature report.
    Report(String),
    /// Color parsing error.
    Color(String),
}

impl fmt::Display for AorusledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AorusledError::Device(e) => write!(f, "{e}"),
            AorusledError::Report(e) => write!(f, "Report error: {e}"),
            AorusledError::Color(e) => write!(f, "Color error: {e}"),
        }
    }
}

impl std::error::Error for AorusledError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AorusledError::Device(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DeviceError> for AorusledError {
    fn from(e: DeviceError) -> Self {
        AorusledError::Device(e)
    }
}

/// Crate-level Result alias using [`AorusledError`].
pub type Result<T> = std::result::Result<T, AorusledError>;
