//! Interpolation functions
//!
//! An interpolation function maps a list of control values and a progress in
//! `[0, 1]` to a number. Tweens call it elementwise for sequence and buffer
//! leaves with the control values `[start, end]`.

use std::rc::Rc;

/// A pluggable interpolation function
pub type InterpolationFn = Rc<dyn Fn(&[f64], f64) -> f64>;

/// Linear interpolation, exact at both ends
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t == 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

/// Piecewise linear interpolation through every control value.
///
/// Progress outside `[0, 1]` extrapolates from the first or last segment.
pub fn linear(values: &[f64], k: f64) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };
    let m = values.len() - 1;
    if m == 0 {
        return first;
    }

    let f = m as f64 * k;
    if k < 0.0 {
        return lerp(values[0], values[1], f);
    }
    if k > 1.0 {
        return lerp(values[m], values[m - 1], m as f64 - f);
    }

    let i = (f.floor() as usize).min(m);
    lerp(values[i], values[(i + 1).min(m)], f - i as f64)
}

/// Bezier curve using the control values as control points
pub fn bezier(values: &[f64], k: f64) -> f64 {
    let n = match values.len() {
        0 => return 0.0,
        len => len - 1,
    };
    values
        .iter()
        .enumerate()
        .map(|(i, v)| binomial(n, i) * (1.0 - k).powi((n - i) as i32) * k.powi(i as i32) * v)
        .sum()
}

/// Catmull-Rom spline through every control value
pub fn catmull_rom(values: &[f64], k: f64) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };
    let m = values.len() - 1;
    if m == 0 {
        return first;
    }

    let f = m as f64 * k;
    let i = f.floor();
    let at = |index: f64| values[(index.max(0.0) as usize).min(m)];

    if k < 0.0 {
        return values[0] - (catmull_rom_segment(values[0], values[0], values[1], values[1], -f) - values[0]);
    }
    if k > 1.0 {
        return values[m]
            - (catmull_rom_segment(values[m], values[m], values[m - 1], values[m - 1], f - m as f64)
                - values[m]);
    }

    catmull_rom_segment(at(i - 1.0), at(i), at(i + 1.0), at(i + 2.0), f - i)
}

fn catmull_rom_segment(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let v0 = (p2 - p0) * 0.5;
    let v1 = (p3 - p1) * 0.5;
    let t2 = t * t;
    let t3 = t * t2;
    (2.0 * p1 - 2.0 * p2 + v0 + v1) * t3 + (-3.0 * p1 + 3.0 * p2 - 2.0 * v0 - v1) * t2 + v0 * t + p1
}

fn binomial(n: usize, k: usize) -> f64 {
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}
