//! Easing functions for tweens
//!
//! Easing reshapes a tween's progress before values are interpolated. Every
//! curve maps `0 -> 0` and `1 -> 1` exactly, so tweens still land on their
//! declared start and end values.

use std::f64::consts::PI;

/// Easing curve applied to tween progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Alias for [`Easing::EaseInCubic`]
    EaseIn,
    /// Alias for [`Easing::EaseOutCubic`]
    EaseOut,
    /// Alias for [`Easing::EaseInOutCubic`]
    EaseInOut,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    /// Overshoots the end value slightly before settling
    EaseOutBack,
    EaseOutBounce,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Apply the curve to a progress value. Input is clamped to `[0, 1]`.
    pub fn apply(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match *self {
            Easing::Linear => t,
            Easing::EaseInQuad => power_in(t, 2),
            Easing::EaseOutQuad => power_out(t, 2),
            Easing::EaseInOutQuad => power_in_out(t, 2),
            Easing::EaseIn | Easing::EaseInCubic => power_in(t, 3),
            Easing::EaseOut | Easing::EaseOutCubic => power_out(t, 3),
            Easing::EaseInOut | Easing::EaseInOutCubic => power_in_out(t, 3),
            Easing::EaseInQuart => power_in(t, 4),
            Easing::EaseOutQuart => power_out(t, 4),
            Easing::EaseInOutQuart => power_in_out(t, 4),
            Easing::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            Easing::EaseOutSine => (t * PI / 2.0).sin(),
            Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Easing::EaseInExpo => 2f64.powf(10.0 * t - 10.0),
            Easing::EaseOutExpo => 1.0 - 2f64.powf(-10.0 * t),
            Easing::EaseInOutExpo => {
                if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Easing::EaseOutBack => {
                const C1: f64 = 1.70158;
                const C3: f64 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
            Easing::EaseOutBounce => bounce_out(t),
            Easing::CubicBezier(x1, y1, x2, y2) => BezierCurve { x1, y1, x2, y2 }.solve(t),
        }
    }
}

#[inline]
fn power_in(t: f64, p: i32) -> f64 {
    t.powi(p)
}

#[inline]
fn power_out(t: f64, p: i32) -> f64 {
    1.0 - (1.0 - t).powi(p)
}

#[inline]
fn power_in_out(t: f64, p: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(p - 1) * t.powi(p)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(p) / 2.0
    }
}

fn bounce_out(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Unit cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1)
struct BezierCurve {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl BezierCurve {
    const EPSILON: f64 = 1e-7;

    /// y for a given x, solving x(p) = x with Newton-Raphson and a bisection fallback
    fn solve(&self, x: f64) -> f64 {
        let mut p = x;
        for _ in 0..8 {
            let err = sample(p, self.x1, self.x2) - x;
            if err.abs() < Self::EPSILON {
                return sample(p, self.y1, self.y2);
            }
            let dx = slope(p, self.x1, self.x2);
            if dx.abs() < Self::EPSILON {
                break;
            }
            p -= err / dx;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        p = x;
        for _ in 0..30 {
            let value = sample(p, self.x1, self.x2);
            if (value - x).abs() < Self::EPSILON {
                break;
            }
            if value < x {
                lo = p;
            } else {
                hi = p;
            }
            p = (lo + hi) * 0.5;
        }
        sample(p, self.y1, self.y2)
    }
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}
