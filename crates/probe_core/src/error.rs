use serde::{Deserialize, Serialize};
use thiserror::Error;

/// GL `INVALID_ENUM`
pub const INVALID_ENUM: u32 = 0x0500;
/// GL `INVALID_VALUE`
pub const INVALID_VALUE: u32 = 0x0501;
/// GL `INVALID_OPERATION`
pub const INVALID_OPERATION: u32 = 0x0502;

/// Error condition reported by a device's accumulated error state.
///
/// The code is kept exactly as the device reported it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("device error 0x{code:04x}: {detail}")]
pub struct DeviceError {
    pub code: u32,
    #[serde(default)]
    pub detail: String,
}

impl DeviceError {
    pub fn new(code: u32, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }
}

/// Errors that can occur while collecting a capability snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("device query failed")]
    QueryFailed(#[from] DeviceError),
}
