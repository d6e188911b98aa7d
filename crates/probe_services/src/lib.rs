//! Probe Services Layer
//!
//! Settings and recorded device profiles, both stored as JSON documents.

pub mod error;
pub mod profile;
pub mod settings;

use std::path::Path;

use serde::de::DeserializeOwned;

pub use error::ServiceError;
pub use profile::{DeviceProfile, ProfileDevice, ProfileLimits};
pub use settings::{AdapterSettings, BackendName, DeviceSource, OutputSettings, PowerPreference, ProbeSettings};

/// Read and parse a JSON document from disk
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ServiceError> {
    let text = std::fs::read_to_string(path).map_err(|source| ServiceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ServiceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
