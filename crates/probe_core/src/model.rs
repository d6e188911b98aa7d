//! Adreno chip model classification
//!
//! Only Adreno renderers carry a model. The table is grouped by
//! generation, newest first, and the order inside each group is part of
//! the contract: a decorated renderer string can contain more than one
//! model number, and the earlier table entry decides.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vendor::GpuVendor;

/// Specific chip identifier, resolved for the Adreno family only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GpuModel {
    Adreno640,
    Adreno630,
    Adreno616,
    Adreno615,
    Adreno612,
    Adreno605,
    Adreno540,
    Adreno530,
    Adreno512,
    Adreno510,
    Adreno509,
    Adreno508,
    Adreno506,
    Adreno505,
    Adreno504,
    Adreno430,
    Adreno420,
    Adreno418,
    Adreno405,
    Adreno330,
    Adreno320,
    Adreno308,
    Adreno306,
    Adreno305,
    Adreno304,
    Adreno225,
    Adreno220,
    Adreno205,
    Adreno203,
    Adreno200,
    Adreno130,
    #[default]
    Unknown,
}

/// Ordered (numeric substring, model) pairs, highest priority first
pub const ADRENO_MODELS: &[(&str, GpuModel)] = &[
    // Adreno 6xx
    ("640", GpuModel::Adreno640),
    ("630", GpuModel::Adreno630),
    ("616", GpuModel::Adreno616),
    ("615", GpuModel::Adreno615),
    ("612", GpuModel::Adreno612),
    ("605", GpuModel::Adreno605),
    // Adreno 5xx
    ("540", GpuModel::Adreno540),
    ("530", GpuModel::Adreno530),
    ("512", GpuModel::Adreno512),
    ("510", GpuModel::Adreno510),
    ("509", GpuModel::Adreno509),
    ("508", GpuModel::Adreno508),
    ("506", GpuModel::Adreno506),
    ("505", GpuModel::Adreno505),
    ("504", GpuModel::Adreno504),
    // Adreno 4xx
    ("430", GpuModel::Adreno430),
    ("420", GpuModel::Adreno420),
    ("418", GpuModel::Adreno418),
    ("405", GpuModel::Adreno405),
    // Adreno 3xx
    ("330", GpuModel::Adreno330),
    ("320", GpuModel::Adreno320),
    ("308", GpuModel::Adreno308),
    ("306", GpuModel::Adreno306),
    ("305", GpuModel::Adreno305),
    ("304", GpuModel::Adreno304),
    // Adreno 2xx
    ("225", GpuModel::Adreno225),
    ("220", GpuModel::Adreno220),
    ("205", GpuModel::Adreno205),
    ("203", GpuModel::Adreno203),
    ("200", GpuModel::Adreno200),
    // Adreno 1xx
    ("130", GpuModel::Adreno130),
];

/// Classify an already-lowercased Adreno renderer string.
///
/// The caller is responsible for having established the vendor; this
/// function only looks for model numbers.
pub fn classify_adreno_model(normalized: &str) -> GpuModel {
    ADRENO_MODELS
        .iter()
        .find(|(number, _)| normalized.contains(number))
        .map(|&(_, model)| model)
        .unwrap_or(GpuModel::Unknown)
}

impl GpuModel {
    /// Marketing model number, e.g. `630`
    pub fn number(self) -> Option<u16> {
        match self {
            GpuModel::Adreno640 => Some(640),
            GpuModel::Adreno630 => Some(630),
            GpuModel::Adreno616 => Some(616),
            GpuModel::Adreno615 => Some(615),
            GpuModel::Adreno612 => Some(612),
            GpuModel::Adreno605 => Some(605),
            GpuModel::Adreno540 => Some(540),
            GpuModel::Adreno530 => Some(530),
            GpuModel::Adreno512 => Some(512),
            GpuModel::Adreno510 => Some(510),
            GpuModel::Adreno509 => Some(509),
            GpuModel::Adreno508 => Some(508),
            GpuModel::Adreno506 => Some(506),
            GpuModel::Adreno505 => Some(505),
            GpuModel::Adreno504 => Some(504),
            GpuModel::Adreno430 => Some(430),
            GpuModel::Adreno420 => Some(420),
            GpuModel::Adreno418 => Some(418),
            GpuModel::Adreno405 => Some(405),
            GpuModel::Adreno330 => Some(330),
            GpuModel::Adreno320 => Some(320),
            GpuModel::Adreno308 => Some(308),
            GpuModel::Adreno306 => Some(306),
            GpuModel::Adreno305 => Some(305),
            GpuModel::Adreno304 => Some(304),
            GpuModel::Adreno225 => Some(225),
            GpuModel::Adreno220 => Some(220),
            GpuModel::Adreno205 => Some(205),
            GpuModel::Adreno203 => Some(203),
            GpuModel::Adreno200 => Some(200),
            GpuModel::Adreno130 => Some(130),
            GpuModel::Unknown => None,
        }
    }

    /// Series the chip belongs to (`6` for the 6xx parts)
    pub fn generation(self) -> Option<u8> {
        self.number().map(|n| (n / 100) as u8)
    }

    pub fn vendor(self) -> GpuVendor {
        match self {
            GpuModel::Unknown => GpuVendor::Unknown,
            _ => GpuVendor::Adreno,
        }
    }
}

impl fmt::Display for GpuModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number() {
            Some(n) => write!(f, "Adreno {n}"),
            None => f.write_str("Unknown"),
        }
    }
}
