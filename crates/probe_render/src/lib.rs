//! Probe Render
//!
//! Live graphics adapters exposed through the probe's device query surface

pub mod adapter;
pub mod backend;

pub use wgpu;

pub use adapter::AdapterDevice;
pub use backend::{request_adapter_device, AdapterRequest, RenderError};

/// Rendering backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Metal (macOS, iOS)
    Metal,
    /// DirectX 12 (Windows)
    DirectX12,
    /// Vulkan (cross-platform)
    Vulkan,
    /// OpenGL / GLES (cross-platform, fallback)
    OpenGL,
    /// WebGPU (web)
    WebGpu,
    /// No real backend
    Empty,
}

impl From<wgpu::Backend> for BackendType {
    fn from(backend: wgpu::Backend) -> Self {
        match backend {
            wgpu::Backend::Metal => BackendType::Metal,
            wgpu::Backend::Dx12 => BackendType::DirectX12,
            wgpu::Backend::Vulkan => BackendType::Vulkan,
            wgpu::Backend::Gl => BackendType::OpenGL,
            wgpu::Backend::BrowserWebGpu => BackendType::WebGpu,
            wgpu::Backend::Empty => BackendType::Empty,
        }
    }
}
