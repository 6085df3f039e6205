//! Squarified tiling (Bruls, Huizing, van Wijk).
//!
//! Children are consumed in their given order. Each strip keeps absorbing
//! the next child while the worst aspect ratio in the strip does not get
//! worse, then the strip is laid along the shorter side of the remaining
//! area and the loop continues in what is left.
//!
//! Arithmetic follows IEEE semantics throughout: degenerate inputs (zero
//! area, zero total) produce non-finite ratios, every comparison against
//! them fails, and the remaining children end up in a single strip.

use canopy_core::Rect;

/// A strip produced by [`squarify`].
#[derive(Debug, Clone, PartialEq)]
pub struct TileRow {
    /// Index range of the children placed in this strip
    pub range: std::ops::Range<usize>,
    /// Sum of the children's values
    pub value: f64,
    /// `true` when children are placed side by side horizontally
    pub dice: bool,
}

/// `max` that propagates NaN instead of ignoring it.
fn max_nan(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

/// A value counts as empty when it is zero or NaN.
fn is_empty_value(v: f64) -> bool {
    v == 0.0 || v.is_nan()
}

/// Lay `values` out left to right across `bounds`, proportionally to `total`.
pub fn dice(values: &[f64], total: f64, bounds: Rect, out: &mut [Rect]) {
    let k = if is_empty_value(total) {
        total
    } else {
        bounds.width() / total
    };
    let mut x = bounds.x0;
    for (slot, v) in out.iter_mut().zip(values) {
        let next = x + v * k;
        *slot = Rect::new(x, bounds.y0, next, bounds.y1);
        x = next;
    }
}

/// Lay `values` out top to bottom across `bounds`, proportionally to `total`.
pub fn slice(values: &[f64], total: f64, bounds: Rect, out: &mut [Rect]) {
    let k = if is_empty_value(total) {
        total
    } else {
        bounds.height() / total
    };
    let mut y = bounds.y0;
    for (slot, v) in out.iter_mut().zip(values) {
        let next = y + v * k;
        *slot = Rect::new(bounds.x0, y, bounds.x1, next);
        y = next;
    }
}

/// Squarify `values` into `bounds`.
///
/// `total` is the parent's value (normally the sum of `values`) and `ratio`
/// the target aspect ratio; values below 1 are treated as 1. Returns one
/// rectangle per value, in input order, plus the strips that were formed.
pub fn squarify(values: &[f64], total: f64, ratio: f64, bounds: Rect) -> (Vec<Rect>, Vec<TileRow>) {
    let ratio = if ratio > 1.0 { ratio } else { 1.0 };
    let n = values.len();
    let mut rects = vec![Rect::default(); n];
    let mut rows = Vec::new();

    let Rect {
        mut x0,
        mut y0,
        x1,
        y1,
    } = bounds;
    let mut value = total;
    let mut i0 = 0;
    let mut i1 = 0;

    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;

        // Find the next non-empty node.
        let mut sum_value;
        loop {
            sum_value = values[i1];
            i1 += 1;
            if !(is_empty_value(sum_value) && i1 < n) {
                break;
            }
        }
        let mut min_value = sum_value;
        let mut max_value = sum_value;
        let alpha = max_nan(dy / dx, dx / dy) / (value * ratio);
        let mut beta = sum_value * sum_value * alpha;
        let mut min_ratio = max_nan(max_value / beta, beta / min_value);

        // Keep adding nodes while the aspect ratio maintains or improves.
        while i1 < n {
            let node_value = values[i1];
            sum_value += node_value;
            if node_value < min_value {
                min_value = node_value;
            }
            if node_value > max_value {
                max_value = node_value;
            }
            beta = sum_value * sum_value * alpha;
            let new_ratio = max_nan(max_value / beta, beta / min_value);
            if new_ratio > min_ratio {
                sum_value -= node_value;
                break;
            }
            min_ratio = new_ratio;
            i1 += 1;
        }

        let dice_row = dx < dy;
        let has_value = !is_empty_value(value);
        if dice_row {
            let top = y0;
            let bottom = if has_value {
                y0 += dy * sum_value / value;
                y0
            } else {
                y1
            };
            dice(
                &values[i0..i1],
                sum_value,
                Rect::new(x0, top, x1, bottom),
                &mut rects[i0..i1],
            );
        } else {
            let left = x0;
            let right = if has_value {
                x0 += dx * sum_value / value;
                x0
            } else {
                x1
            };
            slice(
                &values[i0..i1],
                sum_value,
                Rect::new(left, y0, right, y1),
                &mut rects[i0..i1],
            );
        }
        rows.push(TileRow {
            range: i0..i1,
            value: sum_value,
            dice: dice_row,
        });
        value -= sum_value;
        i0 = i1;
    }

    (rects, rows)
}
