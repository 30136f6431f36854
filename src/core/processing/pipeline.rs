use tracing::debug;

use crate::core::params::ExtractParams;
use crate::core::processing::components::{Component, find_components};
use crate::core::processing::mask::{build_mask, dilate};
use crate::core::processing::merge::merge_touching_boxes;
use crate::core::processing::padding::crop_and_pad;
use crate::core::processing::quality::check_gates;
use crate::core::processing::resize::{choose_pow2_scale, upscale};
use crate::core::processing::tighten::{filter_and_rank, tighten_on_original};
use crate::error::Result;
use crate::types::{QualityGate, RasterImage, Rejection};

/// Outcome of the mask → component → tighten → rank stages for one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionScan {
    /// At or below the solid-pixel floor; nothing further was computed
    Sparse { solid_pixels: usize },
    Regions {
        solid_pixels: usize,
        /// Components found on the dilated mask
        components: usize,
        /// Regions left after merging
        merged: usize,
        /// Tight boxes that survived filtering, largest first
        ranked: Vec<Component>,
    },
}

impl RegionScan {
    pub fn ranked(&self) -> &[Component] {
        match self {
            RegionScan::Sparse { .. } => &[],
            RegionScan::Regions { ranked, .. } => ranked,
        }
    }
}

/// A finished crop: the padded 1x pixels and the upscaled output
#[derive(Debug, Clone)]
pub struct CropArtifact {
    pub region: Component,
    pub pad: usize,
    pub padded: RasterImage,
    pub scale: usize,
    pub scaled: RasterImage,
}

#[derive(Debug, Clone)]
pub enum CropOutcome {
    Ready(CropArtifact),
    Rejected { region: Component, reason: Rejection },
}

/// Locate sprite regions in `img`: mask, dilate, label, merge, tighten on the
/// original mask, then filter and rank.
pub fn find_sprite_regions(img: &RasterImage, params: &ExtractParams) -> RegionScan {
    let (mask, solid_pixels) = build_mask(img, params.alpha_threshold);
    if solid_pixels <= params.min_solid_pixels {
        return RegionScan::Sparse { solid_pixels };
    }

    let grown = dilate(&mask, params.dilate_radius);
    let comps = find_components(&grown);
    let components = comps.len();
    let merged_boxes = merge_touching_boxes(&comps, params.merge_gap);
    let merged = merged_boxes.len();

    let tight = merged_boxes
        .iter()
        .filter_map(|region| tighten_on_original(&mask, region));
    let ranked = filter_and_rank(tight, params.min_solid_pixels, params.min_area);

    debug!(
        "solid={} components={} merged={} kept={}",
        solid_pixels,
        components,
        merged,
        ranked.len()
    );

    RegionScan::Regions {
        solid_pixels,
        components,
        merged,
        ranked,
    }
}

/// Crop, gate and upscale one ranked region
pub fn build_crop(
    img: &RasterImage,
    region: &Component,
    params: &ExtractParams,
    gates: &[QualityGate],
) -> Result<CropOutcome> {
    let padded = crop_and_pad(img, region, params.padding_at_1x);
    if let Err(reason) = check_gates(gates, &padded) {
        return Ok(CropOutcome::Rejected {
            region: *region,
            reason,
        });
    }

    let scale = choose_pow2_scale(
        padded.width() as usize,
        params.target_width,
        params.max_pow2_scale,
    );
    let scaled = upscale(&padded, scale)?;
    Ok(CropOutcome::Ready(CropArtifact {
        region: *region,
        pad: params.padding_at_1x,
        padded,
        scale,
        scaled,
    }))
}

/// Run the whole in-memory pipeline on one image
pub fn extract_crops(img: &RasterImage, params: &ExtractParams) -> Result<Vec<CropOutcome>> {
    let gates = params.quality_gates();
    find_sprite_regions(img, params)
        .ranked()
        .iter()
        .map(|region| build_crop(img, region, params, &gates))
        .collect()
}
