use tracing::debug;

use crate::error::{Error, Result};
use crate::types::RasterImage;

/// Power-of-two scale (1, 2, 4, … up to `max_scale`) that brings `width`
/// closest to `target_width`. Ties go to the smaller factor.
pub fn choose_pow2_scale(width: usize, target_width: usize, max_scale: usize) -> usize {
    let width = width.max(1);
    let mut best = 1;
    let mut best_dist = usize::MAX;
    let mut s: usize = 1;
    while s <= max_scale {
        let Some(scaled) = width.checked_mul(s) else {
            break;
        };
        let dist = scaled.abs_diff(target_width);
        if dist < best_dist {
            best_dist = dist;
            best = s;
        }
        match s.checked_mul(2) {
            Some(next) => s = next,
            None => break,
        }
    }
    best
}

/// Nearest-neighbour resample: destination `(x, y)` reads source
/// `(x * src_w / dst_w, y * src_h / dst_h)`, clamped to the last row/column.
pub fn nearest_resize(src: &RasterImage, target_cols: u32, target_rows: u32) -> RasterImage {
    let (src_cols, src_rows) = src.dimensions();
    let mut dst = RasterImage::new(target_cols, target_rows);
    if src_cols == 0 || src_rows == 0 {
        return dst;
    }

    let src_raw = src.as_raw();
    let row_bytes = target_cols as usize * 4;
    for (y, dst_row) in dst.chunks_exact_mut(row_bytes.max(1)).enumerate() {
        let sy = ((y as u64 * src_rows as u64 / target_rows as u64) as u32).min(src_rows - 1);
        let src_row = sy as usize * src_cols as usize * 4;
        for (x, px) in dst_row.chunks_exact_mut(4).enumerate() {
            let sx =
                ((x as u64 * src_cols as u64 / target_cols as u64) as u32).min(src_cols - 1);
            let i = src_row + sx as usize * 4;
            px.copy_from_slice(&src_raw[i..i + 4]);
        }
    }
    dst
}

/// Upscale `img` by an integer factor. Fails when the output would not fit
/// in `u32` dimensions.
pub fn upscale(img: &RasterImage, scale: usize) -> Result<RasterImage> {
    let (w, h) = img.dimensions();
    let too_large = || Error::InvalidArgument {
        arg: "scale",
        value: format!("{} for {}x{}", scale, w, h),
    };
    let factor = u32::try_from(scale).map_err(|_| too_large())?;
    let tw = w.checked_mul(factor).ok_or_else(too_large)?;
    let th = h.checked_mul(factor).ok_or_else(too_large)?;
    debug!("Upscaling {}x{} by {} -> {}x{}", w, h, scale, tw, th);
    Ok(nearest_resize(img, tw, th))
}
