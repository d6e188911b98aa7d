//! GPU vendor classification
//!
//! Vendors are recognised by keyword containment in the lowercased
//! renderer string. The keyword table is evaluated top to bottom and the
//! first hit wins, so a renderer naming two vendors resolves to whichever
//! comes first in [`VENDOR_KEYWORDS`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse GPU manufacturer family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GpuVendor {
    /// ARM Mali
    Mali,
    /// Qualcomm Adreno
    Adreno,
    /// Imagination PowerVR
    PowerVR,
    Intel,
    Nvidia,
    #[default]
    Unknown,
}

/// Ordered (keyword, vendor) pairs, highest priority first
pub const VENDOR_KEYWORDS: &[(&str, GpuVendor)] = &[
    ("mali", GpuVendor::Mali),
    ("adreno", GpuVendor::Adreno),
    ("powervr", GpuVendor::PowerVR),
    ("intel", GpuVendor::Intel),
    ("nvidia", GpuVendor::Nvidia),
];

/// Classify an already-lowercased renderer string.
///
/// Matching is plain substring containment; keywords are not required to
/// sit on word boundaries.
pub fn classify_vendor(normalized: &str) -> GpuVendor {
    VENDOR_KEYWORDS
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
        .map(|&(_, vendor)| vendor)
        .unwrap_or(GpuVendor::Unknown)
}

impl GpuVendor {
    pub fn name(self) -> &'static str {
        match self {
            GpuVendor::Mali => "Mali",
            GpuVendor::Adreno => "Adreno",
            GpuVendor::PowerVR => "PowerVR",
            GpuVendor::Intel => "Intel",
            GpuVendor::Nvidia => "NVIDIA",
            GpuVendor::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for GpuVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
