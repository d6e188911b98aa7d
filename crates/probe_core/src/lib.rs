//! Probe Core
//!
//! GPU identification and compute capability snapshot:
//! - Renderer string normalization
//! - Vendor and Adreno model classification tables
//! - Device query surface and the capability collector

pub mod classify;
pub mod collector;
pub mod device;
pub mod error;
pub mod info;
pub mod model;
pub mod vendor;

pub use glam;

pub use classify::{classify_renderer, normalize_renderer};
pub use collector::request_gpu_info;
pub use device::{GpuDevice, IndexedIntegerQuery, IndexedStringQuery, IntegerQuery, StringQuery};
pub use error::{DeviceError, ProbeError};
pub use info::GpuInfo;
pub use model::GpuModel;
pub use vendor::GpuVendor;

/// Probe version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
