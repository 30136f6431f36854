//! Heuristic rejects applied to a padded crop before it is scaled and saved.
use std::collections::HashSet;

use crate::types::{QualityGate, RasterImage, Rejection};

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    if a == 0 { 1 } else { a }
}

fn fold_run(acc: usize, run: usize) -> usize {
    if acc == 0 { run } else { gcd(acc, run) }
}

/// GCD of every horizontal run of identical pixels (all rows) and of every
/// vertical run (all columns). `None` for crops one pixel wide or tall.
pub fn run_periods(img: &RasterImage) -> Option<(usize, usize)> {
    let (w, h) = img.dimensions();
    if w <= 1 || h <= 1 {
        return None;
    }

    let mut g_h = 0;
    for y in 0..h {
        let mut run = 1;
        for x in 1..w {
            if img.get_pixel(x - 1, y) == img.get_pixel(x, y) {
                run += 1;
            } else {
                g_h = fold_run(g_h, run);
                run = 1;
            }
        }
        g_h = fold_run(g_h, run);
    }

    let mut g_v = 0;
    for x in 0..w {
        let mut run = 1;
        for y in 1..h {
            if img.get_pixel(x, y - 1) == img.get_pixel(x, y) {
                run += 1;
            } else {
                g_v = fold_run(g_v, run);
                run = 1;
            }
        }
        g_v = fold_run(g_v, run);
    }

    Some((g_h, g_v))
}

/// Row and column periods of a crop whose periods are both above one yet differ,
/// the signature of a slice cut from an inconsistently upscaled sheet.
pub fn mismatched_grid(img: &RasterImage) -> Option<(usize, usize)> {
    run_periods(img).filter(|&(g_h, g_v)| g_h > 1 && g_v > 1 && g_h != g_v)
}

/// Count distinct RGBA tuples, stopping as soon as `min_needed` is reached.
/// Returns the count seen and whether the threshold was met (always true for 0).
pub fn count_unique_colors(img: &RasterImage, min_needed: usize) -> (usize, bool) {
    let mut seen: HashSet<[u8; 4]> = HashSet::with_capacity(min_needed);
    for p in img.pixels() {
        if seen.insert(p.0) && min_needed > 0 && seen.len() >= min_needed {
            return (seen.len(), true);
        }
    }
    (seen.len(), min_needed == 0 || seen.len() >= min_needed)
}

impl QualityGate {
    /// Run this gate; `Err` carries the reason the crop should be dropped
    pub fn check(&self, img: &RasterImage) -> Result<(), Rejection> {
        match self {
            QualityGate::GridPeriodicity(_) => match mismatched_grid(img) {
                Some((row_period, col_period)) => Err(Rejection::MismatchedGrid {
                    row_period,
                    col_period,
                }),
                None => Ok(()),
            },
            QualityGate::UniqueColors(params) => {
                let (found, ok) = count_unique_colors(img, params.min_unique);
                if ok {
                    Ok(())
                } else {
                    Err(Rejection::TooFewColors {
                        found,
                        required: params.min_unique,
                    })
                }
            }
        }
    }
}

/// Run every gate in order, stopping at the first rejection
pub fn check_gates(gates: &[QualityGate], img: &RasterImage) -> Result<(), Rejection> {
    gates.iter().try_for_each(|g| g.check(img))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GridPeriodicityParams, UniqueColorParams};
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    /// Checkerboard of `cw`x`ch` cells
    fn checker(cw: u32, ch: u32, cells: u32) -> RasterImage {
        RasterImage::from_fn(cw * cells, ch * cells, |x, y| {
            if (x / cw + y / ch) % 2 == 0 { RED } else { BLUE }
        })
    }

    #[test]
    fn gcd_handles_zero() {
        assert_eq!(gcd(0, 0), 1);
        assert_eq!(gcd(0, 6), 6);
        assert_eq!(gcd(12, 18), 6);
    }

    #[test]
    fn square_upscaled_checker_has_equal_periods() {
        let img = checker(2, 2, 4);
        assert_eq!(run_periods(&img), Some((2, 2)));
        assert_eq!(mismatched_grid(&img), None);
    }

    #[test]
    fn anisotropic_upscale_is_flagged() {
        let img = checker(2, 3, 4);
        assert_eq!(run_periods(&img), Some((2, 3)));
        assert_eq!(mismatched_grid(&img), Some((2, 3)));
        let gate = QualityGate::GridPeriodicity(GridPeriodicityParams);
        assert_eq!(
            gate.check(&img),
            Err(Rejection::MismatchedGrid {
                row_period: 2,
                col_period: 3
            })
        );
    }

    #[test]
    fn native_resolution_art_passes() {
        let img = checker(1, 1, 5);
        assert_eq!(run_periods(&img), Some((1, 1)));
        assert_eq!(mismatched_grid(&img), None);
    }

    #[test]
    fn thin_crops_skip_the_grid_check() {
        let img = RasterImage::from_pixel(1, 9, RED);
        assert_eq!(run_periods(&img), None);
        assert_eq!(mismatched_grid(&img), None);
    }

    #[test]
    fn unique_colors_exits_early() {
        let img = RasterImage::from_fn(4, 4, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        assert_eq!(count_unique_colors(&img, 3), (3, true));
        assert_eq!(count_unique_colors(&img, 0), (16, true));
    }

    #[test]
    fn two_colors_fail_threshold_of_three() {
        let img = RasterImage::from_fn(6, 6, |x, _| if x < 2 { CLEAR } else { RED });
        let gate = QualityGate::UniqueColors(UniqueColorParams { min_unique: 3 });
        assert_eq!(
            gate.check(&img),
            Err(Rejection::TooFewColors {
                found: 2,
                required: 3
            })
        );
    }

    #[test]
    fn gates_run_in_order() {
        let img = checker(2, 3, 4);
        let gates = [
            QualityGate::UniqueColors(UniqueColorParams { min_unique: 2 }),
            QualityGate::GridPeriodicity(GridPeriodicityParams),
        ];
        assert!(matches!(
            check_gates(&gates, &img),
            Err(Rejection::MismatchedGrid { .. })
        ));
        assert_eq!(check_gates(&[], &img), Ok(()));
    }
}
