//! Shared types and enums used across spritecut.
//! Includes the decoded raster alias, `OutputFormat`, and the `QualityGate`
//! checks applied to padded crops before they are written.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Decoded source or crop raster: non-premultiplied RGBA8, row-major.
pub type RasterImage = image::RgbaImage;

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Webp, // Lossless
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "PNG"),
            OutputFormat::Webp => write!(f, "WebP"),
        }
    }
}

/// Parameters for the mismatched-periodicity check. It has no tunables; the
/// struct exists so every gate variant carries its own parameter record.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct GridPeriodicityParams;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UniqueColorParams {
    /// Minimum number of distinct RGBA tuples a crop needs to be kept
    pub min_unique: usize,
}

/// A check run on a padded crop before it is scaled and written
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum QualityGate {
    GridPeriodicity(GridPeriodicityParams),
    UniqueColors(UniqueColorParams),
}

impl std::fmt::Display for QualityGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityGate::GridPeriodicity(_) => write!(f, "GridPeriodicity"),
            QualityGate::UniqueColors(p) => write!(f, "UniqueColors(>={})", p.min_unique),
        }
    }
}

/// Why a crop was not written
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Rejection {
    /// Row and column run lengths share different periods (e.g. a sheet slice)
    MismatchedGrid { row_period: usize, col_period: usize },
    /// Too few distinct colors to be worth keeping
    TooFewColors { found: usize, required: usize },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::MismatchedGrid {
                row_period,
                col_period,
            } => write!(
                f,
                "off-grid upscaled component (row period {}, column period {})",
                row_period, col_period
            ),
            Rejection::TooFewColors { found, required } => {
                write!(f, "{} unique colours < {}", found, required)
            }
        }
    }
}
