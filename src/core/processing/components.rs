use std::collections::VecDeque;

use ndarray::Array2;

use crate::core::processing::mask::Mask;

/// Inclusive axis-aligned bounding box plus the number of solid pixels it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
    pub count: usize,
}

impl Component {
    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// True when `other`'s box lies entirely inside this one
    pub fn contains(&self, other: &Component) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }
}

const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Label the 8-connected components of `mask` with an iterative flood fill.
///
/// Components come out in row-major scan order of their first pixel.
pub fn find_components(mask: &Mask) -> Vec<Component> {
    let (w, h) = (mask.width(), mask.height());
    let mut visited = Array2::from_elem((h, w), false);
    let mut queue: VecDeque<(usize, usize)> = VecDeque::with_capacity(w * h);
    let mut comps = Vec::new();

    for y in 0..h {
        for x in 0..w {
            if !mask.get(x, y) || visited[[y, x]] {
                continue;
            }
            visited[[y, x]] = true;
            queue.push_back((x, y));

            let mut comp = Component {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
                count: 0,
            };

            while let Some((cx, cy)) = queue.pop_front() {
                comp.count += 1;
                comp.min_x = comp.min_x.min(cx);
                comp.max_x = comp.max_x.max(cx);
                comp.min_y = comp.min_y.min(cy);
                comp.max_y = comp.max_y.max(cy);

                for (dx, dy) in NEIGHBORS_8 {
                    let (Some(nx), Some(ny)) =
                        (cx.checked_add_signed(dx), cy.checked_add_signed(dy))
                    else {
                        continue;
                    };
                    if nx >= w || ny >= h || !mask.get(nx, ny) || visited[[ny, nx]] {
                        continue;
                    }
                    visited[[ny, nx]] = true;
                    queue.push_back((nx, ny));
                }
            }
            comps.push(comp);
        }
    }
    comps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> Mask {
        let h = rows.len();
        let w = rows.first().map_or(0, |r| r.len());
        let mut m = Mask::new(w, h);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.bytes().enumerate() {
                m.set(x, y, c == b'#');
            }
        }
        m
    }

    #[test]
    fn empty_mask_has_no_components() {
        assert!(find_components(&Mask::new(10, 10)).is_empty());
        assert!(find_components(&Mask::new(0, 0)).is_empty());
    }

    #[test]
    fn diagonal_pixels_are_connected() {
        let m = mask_from_rows(&["#..", ".#.", "..#"]);
        let comps = find_components(&m);
        assert_eq!(comps.len(), 1);
        assert_eq!(
            comps[0],
            Component {
                min_x: 0,
                min_y: 0,
                max_x: 2,
                max_y: 2,
                count: 3
            }
        );
    }

    #[test]
    fn components_follow_scan_order() {
        let m = mask_from_rows(&[
            "....##", //
            "##..##",
            "##....",
            "....#.",
        ]);
        let comps = find_components(&m);
        assert_eq!(comps.len(), 3);
        assert_eq!((comps[0].min_x, comps[0].min_y, comps[0].count), (4, 0, 4));
        assert_eq!((comps[1].min_x, comps[1].min_y, comps[1].count), (0, 1, 4));
        assert_eq!((comps[2].min_x, comps[2].min_y, comps[2].count), (4, 3, 1));
    }

    #[test]
    fn boxes_stay_within_bounds() {
        let m = mask_from_rows(&["#.#.#", ".....", "#####", "....#"]);
        for c in find_components(&m) {
            assert!(c.min_x <= c.max_x && c.min_y <= c.max_y);
            assert!(c.max_x < m.width() && c.max_y < m.height());
        }
    }

    #[test]
    fn concave_shape_reports_full_extent() {
        let m = mask_from_rows(&["#...#", "#...#", "#####"]);
        let comps = find_components(&m);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].area(), 15);
        assert_eq!(comps[0].count, 9);
    }
}
