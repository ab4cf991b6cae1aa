//! Easing curves for timed stages

use serde::{Deserialize, Serialize};

/// Progress curve applied to a timed stage.
///
/// Every variant maps `0.0 -> 0.0` and `1.0 -> 1.0` and stays inside `[0, 1]`
/// in between, so a timed stage never overshoots its target. Curves that leave
/// that range are not representable here; overshoot belongs to springs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`; control y values are clamped to `[0, 1]`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Curve used by timed steps that do not pick one explicitly.
    pub const STANDARD: Easing = Easing::EaseInOutQuad;

    /// Apply the curve to a progress value, clamped to `[0, 1]`.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuart => t.powi(4),
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(
                t,
                x1.clamp(0.0, 1.0),
                y1.clamp(0.0, 1.0),
                x2.clamp(0.0, 1.0),
                y2.clamp(0.0, 1.0),
            ),
        }
    }
}

/// Solve `bezier_x(p) == t` then return `bezier_y(p)`.
///
/// Newton-Raphson first, bisection when the slope flattens out.
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let target = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut p = target;
    for _ in 0..8 {
        let err = sample(p, x1, x2) - target;
        if err.abs() < 1e-7 {
            return sample(p, y1, y2) as f32;
        }
        let slope = slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p = (p - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = target;
    for _ in 0..24 {
        let x = sample(p, x1, x2);
        if (x - target).abs() < 1e-7 {
            break;
        }
        if x < target {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    sample(p, y1, y2) as f32
}

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

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 11] = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?}");
        }
    }

    #[test]
    fn test_curves_are_monotonic_and_bounded() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!((0.0..=1.0 + 1e-6).contains(&v), "{easing:?} out of range: {v}");
                assert!(v + 1e-5 >= prev, "{easing:?} not monotonic at {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::Linear.apply(1.5), 1.0);
    }

    #[test]
    fn test_ease_in_out_quad_midpoint() {
        assert!((Easing::STANDARD.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::STANDARD.apply(0.25) - 0.125).abs() < 1e-6);
    }
}
