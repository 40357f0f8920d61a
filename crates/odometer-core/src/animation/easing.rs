//! Pure easing functions for digit roll animations
//!
//! Maps progress in [0, 1] to eased progress in [0, 1]. The default curve is
//! the symmetric ease-in-ease-out cubic Bézier (0.42, 0)–(0.58, 1).

use serde::{Deserialize, Serialize};

/// Easing curve selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the end when the animation finishes
    None,
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Custom cubic Bézier with control points (x1, y1) and (x2, y2)
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Default for EasingType {
    fn default() -> Self {
        EasingType::EaseInOut
    }
}

impl EasingType {
    /// Apply the easing function to a progress value
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::EaseIn => CubicBezier::EASE_IN.solve(t),
            EasingType::EaseOut => CubicBezier::EASE_OUT.solve(t),
            EasingType::EaseInOut => CubicBezier::EASE_IN_OUT.solve(t),
            EasingType::CubicBezier { x1, y1, x2, y2 } => CubicBezier::new(x1, y1, x2, y2).solve(t),
        }
    }
}

/// Cubic Bézier timing curve anchored at (0, 0) and (1, 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    pub const EASE_IN: CubicBezier = CubicBezier { x1: 0.42, y1: 0.0, x2: 1.0, y2: 1.0 };
    pub const EASE_OUT: CubicBezier = CubicBezier { x1: 0.0, y1: 0.0, x2: 0.58, y2: 1.0 };
    pub const EASE_IN_OUT: CubicBezier = CubicBezier { x1: 0.42, y1: 0.0, x2: 0.58, y2: 1.0 };

    const EPSILON: f64 = 1e-7;

    /// Control point x values are clamped to [0, 1] so the curve stays a
    /// function of time.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    #[inline]
    fn sample(a1: f64, a2: f64, s: f64) -> f64 {
        // B(s) = 3(1-s)²s·a1 + 3(1-s)s²·a2 + s³
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
    }

    #[inline]
    fn sample_derivative(a1: f64, a2: f64, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
    }

    /// Curve parameter whose x coordinate equals `x`
    fn parameter_for(&self, x: f64) -> f64 {
        // Newton-Raphson first; falls back to bisection on flat slopes
        let mut s = x;
        for _ in 0..8 {
            let err = Self::sample(self.x1, self.x2, s) - x;
            if err.abs() < Self::EPSILON {
                return s;
            }
            let slope = Self::sample_derivative(self.x1, self.x2, s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        while hi - lo > Self::EPSILON {
            let value = Self::sample(self.x1, self.x2, s);
            if (value - x).abs() < Self::EPSILON {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }

    /// Eased progress for linear progress `t`
    pub fn solve(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        Self::sample(self.y1, self.y2, self.parameter_for(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 6] = [
        EasingType::None,
        EasingType::Linear,
        EasingType::EaseIn,
        EasingType::EaseOut,
        EasingType::EaseInOut,
        EasingType::CubicBezier { x1: 0.25, y1: 0.1, x2: 0.25, y2: 1.0 },
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 0.001, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                let v = easing.apply(t);
                assert!(v + 1e-9 >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let curve = CubicBezier::EASE_IN_OUT;
        assert!((curve.solve(0.5) - 0.5).abs() < 1e-4);
        for i in 1..10 {
            let t = i as f64 / 10.0;
            let sum = curve.solve(t) + curve.solve(1.0 - t);
            assert!((sum - 1.0).abs() < 1e-4, "asymmetric at t={}", t);
        }
        // slow start, slow finish
        assert!(curve.solve(0.1) < 0.1);
        assert!(curve.solve(0.9) > 0.9);
    }

    #[test]
    fn test_default_is_ease_in_out() {
        assert_eq!(EasingType::default(), EasingType::EaseInOut);
    }

    #[test]
    fn test_easing_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            easing: EasingType,
        }
        let w: Wrapper = toml::from_str("easing = \"ease_out\"").unwrap();
        assert_eq!(w.easing, EasingType::EaseOut);
        let w: Wrapper =
            toml::from_str("easing = { cubic_bezier = { x1 = 0.1, y1 = 0.2, x2 = 0.3, y2 = 0.4 } }")
                .unwrap();
        assert_eq!(
            w.easing,
            EasingType::CubicBezier { x1: 0.1, y1: 0.2, x2: 0.3, y2: 0.4 }
        );
    }
}
