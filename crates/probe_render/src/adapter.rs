//! wgpu adapter as a probe device
//!
//! Adapter info, limits and features are read once when the device is
//! built and then served through the GL-shaped query vocabulary. Storage
//! textures stand in for both image bindings and image units, since wgpu
//! has a single limit for them.

use probe_core::error::INVALID_VALUE;
use probe_core::{
    DeviceError, GpuDevice, IndexedIntegerQuery, IndexedStringQuery, IntegerQuery, StringQuery,
};

use crate::BackendType;

pub struct AdapterDevice {
    info: wgpu::AdapterInfo,
    limits: wgpu::Limits,
    extensions: Vec<String>,
    pending: Option<DeviceError>,
}

impl AdapterDevice {
    pub fn new(adapter: &wgpu::Adapter) -> Self {
        Self::from_parts(adapter.get_info(), adapter.limits(), adapter.features())
    }

    pub fn from_parts(info: wgpu::AdapterInfo, limits: wgpu::Limits, features: wgpu::Features) -> Self {
        let extensions = features
            .iter_names()
            .map(|(name, _)| name.to_string())
            .collect();
        Self {
            info,
            limits,
            extensions,
            pending: None,
        }
    }

    pub fn info(&self) -> &wgpu::AdapterInfo {
        &self.info
    }

    pub fn backend(&self) -> BackendType {
        self.info.backend.into()
    }

    fn vendor_name(&self) -> Option<String> {
        let known = match self.info.vendor {
            0x1002 | 0x1022 => "AMD",
            0x10DE => "NVIDIA",
            0x8086 => "Intel",
            0x13B5 => "ARM",
            0x5143 => "Qualcomm",
            0x1010 => "ImgTec",
            0x106B => "Apple",
            0x1414 => "Microsoft",
            0x14E4 => "Broadcom",
            _ if !self.info.driver.is_empty() => return Some(self.info.driver.clone()),
            _ => return None,
        };
        Some(known.to_string())
    }

    /// (major, minor) of the GL context; other backends report no API version
    fn api_version(&self) -> (i32, i32) {
        match self.info.backend {
            wgpu::Backend::Gl => parse_version(&self.info.driver_info).unwrap_or((0, 0)),
            _ => (0, 0),
        }
    }

    fn record(&mut self, error: DeviceError) {
        if self.pending.is_none() {
            self.pending = Some(error);
        }
    }
}

fn clamp(limit: u32) -> i32 {
    i32::try_from(limit).unwrap_or(i32::MAX)
}

/// First `<digits>.<digits>` run in a driver version string
fn parse_version(text: &str) -> Option<(i32, i32)> {
    text.split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .find_map(|token| {
            let mut parts = token.split('.');
            let major = parts.next()?.parse().ok()?;
            let minor = parts.next()?.parse().ok()?;
            Some((major, minor))
        })
}

impl GpuDevice for AdapterDevice {
    fn get_string(&mut self, query: StringQuery) -> Option<String> {
        match query {
            StringQuery::Renderer => Some(self.info.name.clone()).filter(|name| !name.is_empty()),
            StringQuery::Vendor => self.vendor_name(),
            StringQuery::Version => {
                Some(self.info.driver_info.clone()).filter(|info| !info.is_empty())
            }
        }
    }

    fn get_integer(&mut self, query: IntegerQuery) -> i32 {
        let limits = &self.limits;
        match query {
            IntegerQuery::MajorVersion => self.api_version().0,
            IntegerQuery::MinorVersion => self.api_version().1,
            IntegerQuery::NumExtensions => self.extensions.len() as i32,
            IntegerQuery::MaxComputeShaderStorageBlocks => {
                clamp(limits.max_storage_buffers_per_shader_stage)
            }
            IntegerQuery::MaxComputeImageUniforms | IntegerQuery::MaxImageUnits => {
                clamp(limits.max_storage_textures_per_shader_stage)
            }
            IntegerQuery::MaxComputeWorkGroupInvocations => {
                clamp(limits.max_compute_invocations_per_workgroup)
            }
            IntegerQuery::MaxTextureSize => clamp(limits.max_texture_dimension_2d),
            IntegerQuery::MaxArrayTextureLayers => clamp(limits.max_texture_array_layers),
        }
    }

    fn get_integer_indexed(&mut self, query: IndexedIntegerQuery, index: u32) -> i32 {
        match query {
            IndexedIntegerQuery::MaxComputeWorkGroupSize => match index {
                0 => clamp(self.limits.max_compute_workgroup_size_x),
                1 => clamp(self.limits.max_compute_workgroup_size_y),
                2 => clamp(self.limits.max_compute_workgroup_size_z),
                _ => {
                    self.record(DeviceError::new(
                        INVALID_VALUE,
                        format!("work group dimension {index} out of range"),
                    ));
                    0
                }
            },
        }
    }

    fn get_string_indexed(&mut self, query: IndexedStringQuery, index: u32) -> Option<String> {
        match query {
            IndexedStringQuery::Extensions => {
                let extension = self.extensions.get(index as usize).cloned();
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
