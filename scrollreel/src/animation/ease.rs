use crate::foundation::error::{ReelError, ReelResult};

/// Easing functions used to map normalized phase progress.
///
/// Every variant maps `[0, 1]` onto `[0, 1]` with `apply(0) == 0` and `apply(1) == 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Exponential ease-in (`2^(10t - 10)`, pinned to 0 at the origin).
    InExpo,
    /// Exponential ease-out.
    OutExpo,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)` with all control values in `[0, 1]`.
    CubicBezier {
        /// First control point x.
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x.
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
            Self::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let u = solve_bezier_param(x1, x2, t);
                bezier_coord(y1, y2, u).clamp(0.0, 1.0)
            }
        }
    }

    /// Reject parameterizations that would break the `[0, 1] -> [0, 1]` contract.
    pub fn validate(self) -> ReelResult<()> {
        if let Self::CubicBezier { x1, y1, x2, y2 } = self {
            for v in [x1, y1, x2, y2] {
                if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                    return Err(ReelError::validation(
                        "cubic-bezier control values must be finite and within [0, 1]",
                    ));
                }
            }
        }
        Ok(())
    }
}

// One axis of a cubic bezier anchored at 0 and 1.
fn bezier_coord(p1: f64, p2: f64, u: f64) -> f64 {
    let inv = 1.0 - u;
    3.0 * inv * inv * u * p1 + 3.0 * inv * u * u * p2 + u * u * u
}

fn bezier_slope(p1: f64, p2: f64, u: f64) -> f64 {
    let inv = 1.0 - u;
    3.0 * inv * inv * p1 + 6.0 * inv * u * (p2 - p1) + 3.0 * u * u * (1.0 - p2)
}

// x(u) is monotonic for x1, x2 in [0, 1]; Newton first, bisection when the slope vanishes.
fn solve_bezier_param(x1: f64, x2: f64, x: f64) -> f64 {
    const EPS: f64 = 1e-9;

    let mut u = x;
    for _ in 0..8 {
        let err = bezier_coord(x1, x2, u) - x;
        if err.abs() < EPS {
            return u;
        }
        let slope = bezier_slope(x1, x2, u);
        if slope.abs() < 1e-6 {
            break;
        }
        u = (u - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    u = x;
    for _ in 0..64 {
        let v = bezier_coord(x1, x2, u);
        if (v - x).abs() < EPS {
            break;
        }
        if v < x {
            lo = u;
        } else {
            hi = u;
        }
        u = (lo + hi) / 2.0;
    }
    u
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
