use crate::core::processing::components::Component;

/// Box grown outward by `gap` on every side, in signed coordinates so the
/// expansion can cross the image origin.
#[derive(Debug, Clone, Copy)]
struct Expanded {
    min_x: i64,
    min_y: i64,
    max_x: i64,
    max_y: i64,
}

fn expand(c: &Component, gap: usize) -> Expanded {
    let g = gap as i64;
    Expanded {
        min_x: c.min_x as i64 - g,
        min_y: c.min_y as i64 - g,
        max_x: c.max_x as i64 + g,
        max_y: c.max_y as i64 + g,
    }
}

/// Shared edges count as touching
fn intersects(a: &Expanded, b: &Expanded) -> bool {
    !(a.max_x < b.min_x || b.max_x < a.min_x || a.max_y < b.min_y || b.max_y < a.min_y)
}

/// True when the gap-expanded rectangles of `a` and `b` touch
pub fn boxes_touch(a: &Component, b: &Component, gap: usize) -> bool {
    intersects(&expand(a, gap), &expand(b, gap))
}

fn absorb(into: &mut Component, other: &Component) {
    into.min_x = into.min_x.min(other.min_x);
    into.min_y = into.min_y.min(other.min_y);
    into.max_x = into.max_x.max(other.max_x);
    into.max_y = into.max_y.max(other.max_y);
    into.count += other.count;
}

/// Merge boxes whose gap-expanded rectangles touch until no pair does.
///
/// Each sweep lets every unconsumed box swallow the later boxes touching its
/// running (growing) bounds. Sweeps repeat until one performs no merge; the
/// box count strictly drops on every productive sweep so at most `n` sweeps run.
pub fn merge_touching_boxes(boxes: &[Component], gap: usize) -> Vec<Component> {
    if boxes.len() <= 1 {
        return boxes.to_vec();
    }

    let mut arr = boxes.to_vec();
    for _ in 0..boxes.len() {
        let mut changed = false;
        let mut used = vec![false; arr.len()];
        let mut next = Vec::with_capacity(arr.len());

        for i in 0..arr.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            let mut cur = arr[i];
            let mut ex_cur = expand(&cur, gap);

            for j in (i + 1)..arr.len() {
                if used[j] {
                    continue;
                }
                if intersects(&ex_cur, &expand(&arr[j], gap)) {
                    absorb(&mut cur, &arr[j]);
                    used[j] = true;
                    changed = true;
                    ex_cur = expand(&cur, gap);
                }
            }
            next.push(cur);
        }

        arr = next;
        if !changed {
            break;
        }
    }
    arr
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bx(min_x: usize, min_y: usize, max_x: usize, max_y: usize) -> Component {
        Component {
            min_x,
            min_y,
            max_x,
            max_y,
            count: (max_x - min_x + 1) * (max_y - min_y + 1),
        }
    }

    fn assert_fixpoint(out: &[Component], gap: usize) {
        for i in 0..out.len() {
            for j in (i + 1)..out.len() {
                assert!(
                    !boxes_touch(&out[i], &out[j], gap),
                    "{:?} and {:?} still touch",
                    out[i],
                    out[j]
                );
            }
        }
    }

    #[test]
    fn single_and_empty_inputs_are_copied() {
        assert!(merge_touching_boxes(&[], 2).is_empty());
        let one = [bx(1, 1, 2, 2)];
        assert_eq!(merge_touching_boxes(&one, 2), one.to_vec());
    }

    #[test]
    fn boxes_exactly_gap_apart_merge() {
        // Two 3x3 blocks with exactly 2 transparent columns between them
        let a = bx(0, 0, 2, 2);
        let b = bx(5, 0, 7, 2);
        let out = merge_touching_boxes(&[a, b], 2);
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].min_x, out[0].max_x), (0, 7));
        assert_eq!(out[0].count, 18);
    }

    #[test]
    fn boxes_farther_than_gap_stay_apart() {
        let a = bx(0, 0, 2, 2);
        let b = bx(8, 0, 10, 2);
        assert_eq!(merge_touching_boxes(&[a, b], 2).len(), 2);
    }

    #[test]
    fn zero_gap_merges_adjacent_edges() {
        let a = bx(0, 0, 2, 2);
        let b = bx(3, 0, 4, 2);
        // c shares row 2 with a; b is one column clear of a
        let c = bx(2, 2, 2, 4);
        let out = merge_touching_boxes(&[a, b, c], 0);
        assert_eq!(out.len(), 2);
        assert_fixpoint(&out, 0);
    }

    #[test]
    fn growth_late_in_sweep_needs_another_pass() {
        // a reaches b and c only after absorbing d, which sits last in the
        // list, so the first sweep has already walked past them.
        let a = bx(0, 0, 1, 1);
        let c = bx(20, 0, 21, 1);
        let b = bx(10, 10, 11, 11);
        let d = bx(2, 2, 19, 9);
        let out = merge_touching_boxes(&[a, c, b, d], 1);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].count, a.count + b.count + c.count + d.count);
    }

    #[test]
    fn fixpoint_holds_for_scattered_boxes() {
        let mut state: u64 = 42;
        let mut next = || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) as usize
        };
        for _ in 0..20 {
            let boxes: Vec<Component> = (0..30)
                .map(|_| {
                    let x = next() % 200;
                    let y = next() % 200;
                    bx(x, y, x + next() % 6, y + next() % 6)
                })
                .collect();
            for gap in [0, 1, 3] {
                let out = merge_touching_boxes(&boxes, gap);
                assert_fixpoint(&out, gap);
                let total: usize = boxes.iter().map(|b| b.count).sum();
                assert_eq!(out.iter().map(|b| b.count).sum::<usize>(), total);
            }
        }
    }
}
