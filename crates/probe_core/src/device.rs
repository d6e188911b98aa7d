//! Device query surface
//!
//! The collector only needs a handful of read-only queries from the
//! driver. Implementations mirror the GL model: individual queries never
//! fail, errors accumulate on the device and are drained once through
//! [`GpuDevice::take_error`].

use crate::error::DeviceError;

/// String-valued device parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringQuery {
    Renderer,
    Vendor,
    Version,
}

/// Scalar integer device parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerQuery {
    MajorVersion,
    MinorVersion,
    NumExtensions,
    MaxComputeShaderStorageBlocks,
    MaxComputeImageUniforms,
    MaxComputeWorkGroupInvocations,
    MaxTextureSize,
    MaxImageUnits,
    MaxArrayTextureLayers,
}

/// Integer parameters addressed by index (one value per dimension)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexedIntegerQuery {
    MaxComputeWorkGroupSize,
}

/// String parameters addressed by index, sized by a separate count query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexedStringQuery {
    Extensions,
}

/// Handle to the active graphics device.
///
/// Holding a `&mut` to an implementation stands in for having the
/// context current on the calling thread.
pub trait GpuDevice {
    /// `None` when the driver has nothing to report.
    fn get_string(&mut self, query: StringQuery) -> Option<String>;

    fn get_integer(&mut self, query: IntegerQuery) -> i32;

    fn get_integer_indexed(&mut self, query: IndexedIntegerQuery, index: u32) -> i32;

    fn get_string_indexed(&mut self, query: IndexedStringQuery, index: u32) -> Option<String>;

    /// Report and clear the accumulated error state.
    fn take_error(&mut self) -> Result<(), DeviceError>;
}
