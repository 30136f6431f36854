use crate::core::processing::components::Component;
use crate::core::processing::mask::Mask;

/// Recompute `region`'s true extent and solid count against the original
/// (non-dilated) mask. Returns `None` when the region holds no solid pixel.
pub fn tighten_on_original(mask: &Mask, region: &Component) -> Option<Component> {
    let (w, h) = (mask.width(), mask.height());
    if w == 0 || h == 0 {
        return None;
    }
    let min_x = region.min_x.min(w - 1);
    let min_y = region.min_y.min(h - 1);
    let max_x = region.max_x.min(w - 1);
    let max_y = region.max_y.min(h - 1);

    let mut tight: Option<Component> = None;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if !mask.get(x, y) {
                continue;
            }
            let t = tight.get_or_insert(Component {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
                count: 0,
            });
            t.min_x = t.min_x.min(x);
            t.max_x = t.max_x.max(x);
            t.max_y = y;
            t.count += 1;
        }
    }
    tight
}

/// Drop components that are too sparse or too small, then order the rest by
/// solid-pixel count, largest first. Ties keep their discovery order.
pub fn filter_and_rank(
    tight: impl IntoIterator<Item = Component>,
    min_solid_pixels: usize,
    min_area: usize,
) -> Vec<Component> {
    let mut kept: Vec<Component> = tight
        .into_iter()
        .filter(|c| c.count >= min_solid_pixels && c.area() > min_area)
        .collect();

    // Selection sort: only a strictly larger count displaces the current pick,
    // and the pick is rotated (not swapped) into place so equal counts keep order.
    for i in 0..kept.len().saturating_sub(1) {
        let mut max_idx = i;
        for j in (i + 1)..kept.len() {
            if kept[j].count > kept[max_idx].count {
                max_idx = j;
            }
        }
        if max_idx != i {
            kept[i..=max_idx].rotate_right(1);
        }
    }
    kept
}
