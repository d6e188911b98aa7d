//! Capability snapshot

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::model::GpuModel;
use crate::vendor::GpuVendor;

/// Identification and compute limits of one device, captured in a single
/// collection call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GpuInfo {
    pub renderer_name: String,
    pub vendor_name: String,
    pub version: String,
    pub major_version: i32,
    pub minor_version: i32,

    pub vendor: GpuVendor,
    /// Only ever set for [`GpuVendor::Adreno`]
    pub model: GpuModel,

    /// In the order the device reported them
    pub extensions: Vec<String>,

    pub max_ssbo_bindings: i32,
    pub max_image_bindings: i32,
    pub max_image_units: i32,
    pub max_texture_size: i32,
    pub max_array_texture_layers: i32,
    pub max_work_group_invocations: i32,
    pub max_work_group_size: IVec3,
}

impl GpuInfo {
    /// Compute shaders need at least GL ES 3.1
    pub fn is_opengl31_or_above(&self) -> bool {
        (self.major_version == 3 && self.minor_version >= 1) || self.major_version > 3
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|ext| ext == name)
    }

    pub fn is_adreno(&self) -> bool {
        self.vendor == GpuVendor::Adreno
    }

    pub fn is_mali(&self) -> bool {
        self.vendor == GpuVendor::Mali
    }
}
