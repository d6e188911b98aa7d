//! Capability collection
//!
//! Runs the full query sequence against a device, then checks the
//! device's error state exactly once. Any error reported at that point
//! discards the snapshot built so far.

use glam::IVec3;

use crate::classify::classify_renderer;
use crate::device::{GpuDevice, IndexedIntegerQuery, IndexedStringQuery, IntegerQuery, StringQuery};
use crate::error::ProbeError;
use crate::info::GpuInfo;

/// Collect a [`GpuInfo`] snapshot from the active device.
///
/// The caller owns making the device current; nothing here retries or
/// caches.
pub fn request_gpu_info<D: GpuDevice + ?Sized>(device: &mut D) -> Result<GpuInfo, ProbeError> {
    let mut info = GpuInfo::default();

    if let Some(renderer) = device.get_string(StringQuery::Renderer) {
        let (vendor, model) = classify_renderer(&renderer);
        info.vendor = vendor;
        info.model = model;
        info.renderer_name = renderer;
    }
    info.vendor_name = device.get_string(StringQuery::Vendor).unwrap_or_default();
    info.version = device.get_string(StringQuery::Version).unwrap_or_default();

    info.major_version = device.get_integer(IntegerQuery::MajorVersion);
    info.minor_version = device.get_integer(IntegerQuery::MinorVersion);

    let extension_count = device.get_integer(IntegerQuery::NumExtensions).max(0) as u32;
    info.extensions = (0..extension_count)
        .map(|i| {
            device
                .get_string_indexed(IndexedStringQuery::Extensions, i)
                .unwrap_or_default()
        })
        .collect();

    info.max_ssbo_bindings = device.get_integer(IntegerQuery::MaxComputeShaderStorageBlocks);
    info.max_image_bindings = device.get_integer(IntegerQuery::MaxComputeImageUniforms);
    info.max_work_group_size = IVec3::new(
        device.get_integer_indexed(IndexedIntegerQuery::MaxComputeWorkGroupSize, 0),
        device.get_integer_indexed(IndexedIntegerQuery::MaxComputeWorkGroupSize, 1),
        device.get_integer_indexed(IndexedIntegerQuery::MaxComputeWorkGroupSize, 2),
    );
    info.max_work_group_invocations =
        device.get_integer(IntegerQuery::MaxComputeWorkGroupInvocations);
    info.max_texture_size = device.get_integer(IntegerQuery::MaxTextureSize);
    info.max_image_units = device.get_integer(IntegerQuery::MaxImageUnits);
    info.max_array_texture_layers = device.get_integer(IntegerQuery::MaxArrayTextureLayers);

    device.take_error()?;

    tracing::debug!(
        renderer = %info.renderer_name,
        vendor = %info.vendor,
        model = %info.model,
        extensions = info.extensions.len(),
        "collected gpu info"
    );
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DeviceError, INVALID_VALUE};
    use crate::model::GpuModel;
    use crate::vendor::GpuVendor;

    /// Fixed responses; fails once `queries` reaches `fail_at`
    struct MockDevice {
        renderer: Option<&'static str>,
        extensions: Vec<&'static str>,
        reported_extension_count: Option<i32>,
        fail_at: Option<usize>,
        queries: usize,
        pending: Option<DeviceError>,
        error_checks: usize,
    }

    impl MockDevice {
        fn new() -> Self {
            Self {
                renderer: Some("Adreno (TM) 630"),
                extensions: vec![
                    "GL_EXT_color_buffer_float",
                    "GL_OES_texture_float",
                    "GL_EXT_texture_buffer",
                    "GL_OES_shader_image_atomic",
                    "GL_EXT_geometry_shader",
                ],
                reported_extension_count: None,
                fail_at: None,
                queries: 0,
                pending: None,
                error_checks: 0,
            }
        }

        fn tick(&mut self) {
            if self.fail_at == Some(self.queries) && self.pending.is_none() {
                self.pending = Some(DeviceError::new(0x0502, "injected"));
            }
            self.queries += 1;
        }
    }

    impl GpuDevice for MockDevice {
        fn get_string(&mut self, query: StringQuery) -> Option<String> {
            self.tick();
            match query {
                StringQuery::Renderer => self.renderer.map(str::to_owned),
                StringQuery::Vendor => Some("Qualcomm".to_owned()),
                StringQuery::Version => Some("OpenGL ES 3.2 V@415.0".to_owned()),
            }
        }

        fn get_integer(&mut self, query: IntegerQuery) -> i32 {
            self.tick();
            match query {
                IntegerQuery::MajorVersion => 3,
                IntegerQuery::MinorVersion => 2,
                IntegerQuery::NumExtensions => self
                    .reported_extension_count
                    .unwrap_or(self.extensions.len() as i32),
                IntegerQuery::MaxComputeShaderStorageBlocks => 24,
                IntegerQuery::MaxComputeImageUniforms => 8,
                IntegerQuery::MaxComputeWorkGroupInvocations => 1024,
                IntegerQuery::MaxTextureSize => 16384,
                IntegerQuery::MaxImageUnits => 9,
                IntegerQuery::MaxArrayTextureLayers => 2048,
            }
        }

        fn get_integer_indexed(&mut self, _query: IndexedIntegerQuery, index: u32) -> i32 {
            self.tick();
            match index {
                0 => 1024,
                1 => 512,
                2 => 64,
                _ => {
                    self.pending.get_or_insert(DeviceError::new(INVALID_VALUE, "index"));
                    0
                }
            }
        }

        fn get_string_indexed(&mut self, _query: IndexedStringQuery, index: u32) -> Option<String> {
            self.tick();
            match self.extensions.get(index as usize) {
                Some(ext) => Some((*ext).to_owned()),
                None => {
                    self.pending.get_or_insert(DeviceError::new(INVALID_VALUE, "index"));
                    None
                }
            }
        }

        fn take_error(&mut self) -> Result<(), DeviceError> {
            self.error_checks += 1;
            match self.pending.take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    #[test]
    fn test_snapshot_matches_device() {
        let mut device = MockDevice::new();
        let info = request_gpu_info(&mut device).unwrap();

        assert_eq!(info.renderer_name, "Adreno (TM) 630");
        assert_eq!(info.vendor_name, "Qualcomm");
        assert_eq!(info.version, "OpenGL ES 3.2 V@415.0");
        assert_eq!((info.major_version, info.minor_version), (3, 2));
        assert_eq!(info.vendor, GpuVendor::Adreno);
        assert_eq!(info.model, GpuModel::Adreno630);
        assert_eq!(info.extensions, device.extensions);
        assert_eq!(info.max_ssbo_bindings, 24);
        assert_eq!(info.max_image_bindings, 8);
        assert_eq!(info.max_image_units, 9);
        assert_eq!(info.max_texture_size, 16384);
        assert_eq!(info.max_array_texture_layers, 2048);
        assert_eq!(info.max_work_group_invocations, 1024);
        assert_eq!(info.max_work_group_size, IVec3::new(1024, 512, 64));
        assert_eq!(device.error_checks, 1);
    }

    #[test]
    fn test_missing_renderer_leaves_classification_unknown() {
        let mut device = MockDevice::new();
        device.renderer = None;
        let info = request_gpu_info(&mut device).unwrap();

        assert!(info.renderer_name.is_empty());
        assert_eq!(info.vendor, GpuVendor::Unknown);
        assert_eq!(info.model, GpuModel::Unknown);
        assert_eq!(info.vendor_name, "Qualcomm");
    }

    #[test]
    fn test_error_at_any_query_fails_collection() {
        let total = {
            let mut device = MockDevice::new();
            request_gpu_info(&mut device).unwrap();
            device.queries
        };

        for fail_at in 0..total {
            let mut device = MockDevice::new();
            device.fail_at = Some(fail_at);
            let result = request_gpu_info(&mut device);
            assert_eq!(
                result,
                Err(ProbeError::QueryFailed(DeviceError::new(0x0502, "injected"))),
                "query {fail_at}"
            );
            // the whole sequence still runs before the single check
            assert_eq!(device.queries, total);
            assert_eq!(device.error_checks, 1);
        }
    }

    #[test]
    fn test_error_state_is_drained() {
        let mut device = MockDevice::new();
        device.fail_at = Some(0);
        assert!(request_gpu_info(&mut device).is_err());

        device.fail_at = None;
        assert!(request_gpu_info(&mut device).is_ok());
    }

    #[test]
    fn test_overreported_extension_count_fails() {
        let mut device = MockDevice::new();
        device.reported_extension_count = Some(7);
        let err = request_gpu_info(&mut device).unwrap_err();
        let ProbeError::QueryFailed(device_err) = err;
        assert_eq!(device_err.code, INVALID_VALUE);
    }

    #[test]
    fn test_negative_extension_count_is_empty() {
        let mut device = MockDevice::new();
        device.reported_extension_count = Some(-1);
        let info = request_gpu_info(&mut device).unwrap();
        assert!(info.extensions.is_empty());
    }

    #[test]
    fn test_works_through_trait_object() {
        let mut device = MockDevice::new();
        let dyn_device: &mut dyn GpuDevice = &mut device;
        let info = request_gpu_info(dyn_device).unwrap();
        assert_eq!(info.model, GpuModel::Adreno630);
    }
}
