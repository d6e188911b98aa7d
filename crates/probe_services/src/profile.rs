//! Recorded device profiles
//!
//! A profile captures every answer a driver gave to the probe's queries so
//! a device can be replayed without the hardware. [`ProfileDevice`] keeps
//! the accumulated-error behaviour of a real context: bad indices and
//! injected faults are latched and only surface through `take_error`.

use std::path::Path;

use probe_core::error::INVALID_VALUE;
use probe_core::{
    DeviceError, GpuDevice, IndexedIntegerQuery, IndexedStringQuery, IntegerQuery, StringQuery,
};
use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// Fixed driver responses for one device
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    pub renderer: Option<String>,
    pub vendor: Option<String>,
    pub version: Option<String>,
    pub major_version: i32,
    pub minor_version: i32,
    pub extensions: Vec<String>,
    pub limits: ProfileLimits,
    /// Fault to report from the error check
    pub error: Option<DeviceError>,
    /// Number of queries answered before `error` is raised
    pub error_after_queries: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileLimits {
    pub max_ssbo_bindings: i32,
    pub max_image_bindings: i32,
    pub max_image_units: i32,
    pub max_texture_size: i32,
    pub max_array_texture_layers: i32,
    pub max_work_group_invocations: i32,
    pub max_work_group_size: [i32; 3],
}

impl DeviceProfile {
    pub fn load(path: &Path) -> Result<Self, ServiceError> {
        let profile: Self = crate::read_json(path)?;
        tracing::debug!(
            path = %path.display(),
            renderer = profile.renderer.as_deref().unwrap_or(""),
            "loaded device profile"
        );
        Ok(profile)
    }
}

/// Replays a [`DeviceProfile`] through the device query surface
#[derive(Debug, Clone)]
pub struct ProfileDevice {
    profile: DeviceProfile,
    queries: usize,
    injected: bool,
    pending: Option<DeviceError>,
}

impl ProfileDevice {
    pub fn new(profile: DeviceProfile) -> Self {
        Self {
            profile,
            queries: 0,
            injected: false,
            pending: None,
        }
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Queries answered so far
    pub fn query_count(&self) -> usize {
        self.queries
    }

    fn record(&mut self, error: DeviceError) {
        // First error sticks until drained, as with glGetError
        if self.pending.is_none() {
            self.pending = Some(error);
        }
    }

    fn tick(&mut self) {
        if !self.injected && self.queries >= self.profile.error_after_queries.unwrap_or(0) {
            if let Some(error) = self.profile.error.clone() {
                self.injected = true;
                self.record(error);
            }
        }
        self.queries += 1;
    }
}

impl GpuDevice for ProfileDevice {
    fn get_string(&mut self, query: StringQuery) -> Option<String> {
        self.tick();
        match query {
            StringQuery::Renderer => self.profile.renderer.clone(),
            StringQuery::Vendor => self.profile.vendor.clone(),
            StringQuery::Version => self.profile.version.clone(),
        }
    }

    fn get_integer(&mut self, query: IntegerQuery) -> i32 {
        self.tick();
        let limits = &self.profile.limits;
        match query {
            IntegerQuery::MajorVersion => self.profile.major_version,
            IntegerQuery::MinorVersion => self.profile.minor_version,
            IntegerQuery::NumExtensions => self.profile.extensions.len() as i32,
            IntegerQuery::MaxComputeShaderStorageBlocks => limits.max_ssbo_bindings,
            IntegerQuery::MaxComputeImageUniforms => limits.max_image_bindings,
            IntegerQuery::MaxComputeWorkGroupInvocations => limits.max_work_group_invocations,
            IntegerQuery::MaxTextureSize => limits.max_texture_size,
            IntegerQuery::MaxImageUnits => limits.max_image_units,
            IntegerQuery::MaxArrayTextureLayers => limits.max_array_texture_layers,
        }
    }

    fn get_integer_indexed(&mut self, query: IndexedIntegerQuery, index: u32) -> i32 {
        self.tick();
        match query {
            IndexedIntegerQuery::MaxComputeWorkGroupSize => {
                let size = self.profile.limits.max_work_group_size.get(index as usize).copied();
                match size {
                    Some(size) => size,
                    None => {
                        self.record(DeviceError::new(
                            INVALID_VALUE,
                            format!("work group dimension {index} out of range"),
                        ));
                        0
                    }
                }
            }
        }
    }

    fn get_string_indexed(&mut self, query: IndexedStringQuery, index: u32) -> Option<String> {
        self.tick();
        match query {
            IndexedStringQuery::Extensions => {
                let extension = self.profile.extensions.get(index as usize).cloned();
                if extension.is_none() {
                    self.record(DeviceError::new(
                        INVALID_VALUE,
                        format!("extension index {index} out of range"),
                    ));
                }
                extension
            }
        }
    }

    fn take_error(&mut self) -> Result<(), DeviceError> {
        match self.pending.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probe_core::glam::IVec3;
    use probe_core::{request_gpu_info, GpuModel, GpuVendor, ProbeError};

    const MALI_PROFILE: &str = r#"{
        "renderer": "Mali-G76",
        "vendor": "ARM",
        "version": "OpenGL ES 3.2 v1.r19p0",
        "major_version": 3,
        "minor_version": 2,
        "extensions": [
            "GL_EXT_debug_marker",
            "GL_ARM_rgba8",
            "GL_OES_texture_3D",
            "GL_EXT_shader_pixel_local_storage",
            "GL_EXT_texture_buffer"
        ],
        "limits": {
            "max_ssbo_bindings": 8,
            "max_image_bindings": 8,
            "max_image_units": 8,
            "max_texture_size": 8192,
            "max_array_texture_layers": 2048,
            "max_work_group_invocations": 384,
            "max_work_group_size": [384, 384, 384]
        }
    }"#;

    fn mali() -> DeviceProfile {
        serde_json::from_str(MALI_PROFILE).unwrap()
    }

    #[test]
    fn test_replay_reproduces_every_field() {
        let profile = mali();
        let mut device = ProfileDevice::new(profile.clone());
        let info = request_gpu_info(&mut device).unwrap();

        assert_eq!(Some(info.renderer_name.as_str()), profile.renderer.as_deref());
        assert_eq!(info.vendor_name, "ARM");
        assert_eq!(info.version, "OpenGL ES 3.2 v1.r19p0");
        assert_eq!((info.major_version, info.minor_version), (3, 2));
        assert_eq!(info.vendor, GpuVendor::Mali);
        assert_eq!(info.model, GpuModel::Unknown);
        assert_eq!(info.extensions, profile.extensions);
        assert_eq!(info.max_ssbo_bindings, 8);
        assert_eq!(info.max_image_bindings, 8);
        assert_eq!(info.max_image_units, 8);
        assert_eq!(info.max_texture_size, 8192);
        assert_eq!(info.max_array_texture_layers, 2048);
        assert_eq!(info.max_work_group_invocations, 384);
        assert_eq!(info.max_work_group_size, IVec3::splat(384));
    }

    #[test]
    fn test_missing_strings_become_empty() {
        let mut device = ProfileDevice::new(DeviceProfile::default());
        let info = request_gpu_info(&mut device).unwrap();
        assert!(info.renderer_name.is_empty());
        assert!(info.vendor_name.is_empty());
        assert!(info.version.is_empty());
        assert!(info.extensions.is_empty());
        assert_eq!(info.vendor, GpuVendor::Unknown);
    }

    #[test]
    fn test_injected_error_fails_collection() {
        let mut profile = mali();
        profile.error = Some(DeviceError::new(0x0505, "out of memory"));
        profile.error_after_queries = Some(12);
        let mut device = ProfileDevice::new(profile);

        let err = request_gpu_info(&mut device).unwrap_err();
        assert_eq!(err, ProbeError::QueryFailed(DeviceError::new(0x0505, "out of memory")));

        // Latched once, so a retry on the same device succeeds
        assert!(request_gpu_info(&mut device).is_ok());
    }

    #[test]
    fn test_injected_error_never_reached() {
        let mut profile = mali();
        profile.error = Some(DeviceError::new(0x0505, "late"));
        profile.error_after_queries = Some(10_000);
        let mut device = ProfileDevice::new(profile);
        assert!(request_gpu_info(&mut device).is_ok());
    }

    #[test]
    fn test_out_of_range_index_latches_invalid_value() {
        let mut device = ProfileDevice::new(mali());
        assert_eq!(device.get_integer_indexed(IndexedIntegerQuery::MaxComputeWorkGroupSize, 3), 0);
        assert_eq!(device.get_string_indexed(IndexedStringQuery::Extensions, 5), None);

        let err = device.take_error().unwrap_err();
        assert_eq!(err.code, INVALID_VALUE);
        assert!(err.detail.contains("dimension 3"));
        assert!(device.take_error().is_ok());
        assert_eq!(device.query_count(), 2);
    }

    #[test]
    fn test_error_field_round_trips_through_json() {
        let profile: DeviceProfile =
            serde_json::from_str(r#"{ "error": { "code": 1282 }, "error_after_queries": 3 }"#).unwrap();
        assert_eq!(profile.error, Some(DeviceError::new(0x0502, "")));
        assert_eq!(profile.error_after_queries, Some(3));
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let path = std::env::temp_dir().join(format!("gpuprobe-profile-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let err = DeviceProfile::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ServiceError::Parse { .. }));
    }
}
