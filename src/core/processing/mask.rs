use ndarray::Array2;

use crate::types::RasterImage;

/// Binary solid/transparent grid with the same dimensions as its source image.
/// Indexed `[[y, x]]` like every other row-major grid in the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    cells: Array2<bool>,
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), false),
        }
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[[y, x]]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        self.cells[[y, x]] = value;
    }

    pub fn count_solid(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// True when every cell set here is also set in `other`
    pub fn is_subset_of(&self, other: &Mask) -> bool {
        self.cells.dim() == other.cells.dim()
            && self
                .cells
                .iter()
                .zip(other.cells.iter())
                .all(|(&a, &b)| !a || b)
    }
}

/// Build the solid mask of `img`; a pixel is solid iff its alpha is at least
/// `alpha_threshold`. Returns the mask together with its solid-pixel count.
pub fn build_mask(img: &RasterImage, alpha_threshold: u8) -> (Mask, usize) {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let mut solid_count = 0;
    let cells = Array2::from_shape_fn((h, w), |(y, x)| {
        let solid = img.get_pixel(x as u32, y as u32)[3] >= alpha_threshold;
        if solid {
            solid_count += 1;
        }
        solid
    });
    (Mask { cells }, solid_count)
}

/// Grow `mask` by a square structuring element of radius `r` (Chebyshev
/// distance). `r == 0` returns an unmodified copy.
pub fn dilate(mask: &Mask, r: usize) -> Mask {
    if r == 0 {
        return mask.clone();
    }
    let (w, h) = (mask.width(), mask.height());
    let cells = Array2::from_shape_fn((h, w), |(y, x)| {
        let y0 = y.saturating_sub(r);
        let y1 = (y + r).min(h - 1);
        let x0 = x.saturating_sub(r);
        let x1 = (x + r).min(w - 1);
        (y0..=y1).any(|yy| (x0..=x1).any(|xx| mask.cells[[yy, xx]]))
    });
    Mask { cells }
}
