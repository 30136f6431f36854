use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{GridPeriodicityParams, OutputFormat, QualityGate, UniqueColorParams};

/// Largest accepted `max_pow2_scale`
pub const MAX_POW2_SCALE_LIMIT: usize = 1 << 16;

/// Extraction parameters suitable for config files and CLI overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractParams {
    /// Alpha at or above this value counts as solid
    pub alpha_threshold: u8,
    /// Square structuring-element radius applied before grouping
    pub dilate_radius: usize,
    /// Boxes whose grown bounds touch within this gap are merged
    pub merge_gap: usize,
    /// Components with fewer solid pixels are dropped; images with at most this many are skipped
    pub min_solid_pixels: usize,
    /// Components whose bounding area is at or below this are dropped
    pub min_area: usize,
    /// Transparent border added around each crop before scaling
    pub padding_at_1x: usize,
    /// Width the power-of-two scale aims for
    pub target_width: usize,
    /// Largest allowed scale factor (only powers of two up to this are tried)
    pub max_pow2_scale: usize,
    pub strict_grid_guard: bool,
    /// 0 disables the colour-diversity check
    pub min_unique_colors: usize,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            alpha_threshold: 16,
            dilate_radius: 1,
            merge_gap: 2,
            min_solid_pixels: 10,
            min_area: 4,
            padding_at_1x: 2,
            target_width: 800,
            max_pow2_scale: 8,
            strict_grid_guard: false,
            min_unique_colors: 3,
            output_dir: PathBuf::from("cropped"),
            format: OutputFormat::Png,
        }
    }
}

impl ExtractParams {
    /// Load parameters from a JSON file; missing fields fall back to defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: ExtractParams = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_width == 0 {
            return Err(Error::InvalidArgument {
                arg: "target_width",
                value: self.target_width.to_string(),
            });
        }
        if self.max_pow2_scale == 0 || self.max_pow2_scale > MAX_POW2_SCALE_LIMIT {
            return Err(Error::InvalidArgument {
                arg: "max_pow2_scale",
                value: self.max_pow2_scale.to_string(),
            });
        }
        Ok(())
    }

    /// Gates enabled by this configuration, in the order they are evaluated
    pub fn quality_gates(&self) -> Vec<QualityGate> {
        let mut gates = Vec::with_capacity(2);
        if self.strict_grid_guard {
            gates.push(QualityGate::GridPeriodicity(GridPeriodicityParams));
        }
        if self.min_unique_colors > 0 {
            gates.push(QualityGate::UniqueColors(UniqueColorParams {
                min_unique: self.min_unique_colors,
            }));
        }
        gates
    }
}
