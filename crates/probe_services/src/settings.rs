//! Settings management

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// Probe settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub source: DeviceSource,
    pub adapter: AdapterSettings,
    /// Recorded profile to replay when `source` is `profile`
    pub profile_path: Option<PathBuf>,
    pub output: OutputSettings,
}

/// Where device answers come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceSource {
    /// A live graphics adapter
    #[default]
    Adapter,
    /// A recorded [`crate::DeviceProfile`]
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterSettings {
    /// Empty means every backend the platform offers
    pub backends: Vec<BackendName>,
    pub power_preference: PowerPreference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendName {
    Vulkan,
    Metal,
    Dx12,
    Gl,
    BrowserWebgpu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerPreference {
    None,
    LowPower,
    #[default]
    HighPerformance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl ProbeSettings {
    /// Load settings from a JSON file; absent fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ServiceError> {
        let settings: Self = crate::read_json(path)?;
        tracing::debug!(path = %path.display(), source = ?settings.source, "loaded settings");
        Ok(settings)
    }
}
