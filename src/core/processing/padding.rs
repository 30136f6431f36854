use tracing::debug;

use crate::core::processing::components::Component;
use crate::types::RasterImage;

/// Copy the pixels of `region` (intersected with the image bounds) onto a
/// fully transparent canvas with `pad` pixels of border on every side.
pub fn crop_and_pad(src: &RasterImage, region: &Component, pad: usize) -> RasterImage {
    let (src_w, src_h) = (src.width() as usize, src.height() as usize);
    let x0 = region.min_x.min(src_w);
    let y0 = region.min_y.min(src_h);
    let x1 = (region.max_x + 1).min(src_w);
    let y1 = (region.max_y + 1).min(src_h);
    let cols = x1.saturating_sub(x0);
    let rows = y1.saturating_sub(y0);

    let out_w = cols + 2 * pad;
    let out_h = rows + 2 * pad;
    debug!(
        "Cropping {}x{} at ({}, {}) with pad {} -> {}x{}",
        cols, rows, x0, y0, pad, out_w, out_h
    );

    let mut padded = vec![0u8; out_w * out_h * 4];
    let src_raw = src.as_raw();
    // Copy per row using slice copies to minimize per-pixel indexing
    for row in 0..rows {
        let src_offset = ((y0 + row) * src_w + x0) * 4;
        let dst_offset = ((row + pad) * out_w + pad) * 4;
        padded[dst_offset..dst_offset + cols * 4]
            .copy_from_slice(&src_raw[src_offset..src_offset + cols * 4]);
    }

    RasterImage::from_raw(out_w as u32, out_h as u32, padded)
        .unwrap_or_else(|| RasterImage::new(out_w as u32, out_h as u32))
}
