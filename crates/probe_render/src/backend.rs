//! Adapter acquisition
//!
//! wgpu hands out adapters asynchronously; the probe contract is
//! synchronous, so acquisition blocks on the request.

use thiserror::Error;

use crate::adapter::AdapterDevice;

/// Which adapter to open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterRequest {
    pub backends: wgpu::Backends,
    pub power_preference: wgpu::PowerPreference,
}

impl Default for AdapterRequest {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no graphics adapter available for backends {backends:?}")]
    NoAdapter { backends: wgpu::Backends },
}

/// Open an adapter and wrap it as a queryable device
pub fn request_adapter_device(request: &AdapterRequest) -> Result<AdapterDevice, RenderError> {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: request.backends,
        ..Default::default()
    });

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: request.power_preference,
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .ok_or(RenderError::NoAdapter {
        backends: request.backends,
    })?;

    let device = AdapterDevice::new(&adapter);
    tracing::info!(
        adapter = %device.info().name,
        backend = ?device.backend(),
        "selected graphics adapter"
    );
    Ok(device)
}
