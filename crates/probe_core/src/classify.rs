//! Renderer string normalization and the combined vendor/model lookup

use crate::model::{classify_adreno_model, GpuModel};
use crate::vendor::{classify_vendor, GpuVendor};

/// Lowercase a raw driver string for case-insensitive matching.
///
/// Only ASCII letters are folded; every keyword and model number in the
/// tables is ASCII.
pub fn normalize_renderer(raw: &str) -> String {
    raw.to_ascii_lowercase()
}

/// Resolve vendor and model from a raw renderer string.
///
/// The model is only looked up for Adreno renderers and is
/// [`GpuModel::Unknown`] for every other vendor.
pub fn classify_renderer(raw: &str) -> (GpuVendor, GpuModel) {
    let normalized = normalize_renderer(raw);
    let vendor = classify_vendor(&normalized);
    let model = match vendor {
        GpuVendor::Adreno => classify_adreno_model(&normalized),
        _ => GpuModel::Unknown,
    };
    (vendor, model)
}
