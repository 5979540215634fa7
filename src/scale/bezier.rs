//! Cubic Bézier easing curves
//!
//! A curve runs from (0, 0) to (1, 1) with two free control points, exactly
//! like CSS `cubic-bezier()`. Scales use it to remap an even position along
//! the scale into a lightness position.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Newton-Raphson iterations for the x → t solve
const NEWTON_ITERATIONS: usize = 8;

/// Slopes flatter than this stop the Newton iteration
const MIN_SLOPE: f64 = 1e-6;

/// Largest accepted |x(t) − x| before falling back to bisection
const SOLVE_TOLERANCE: f64 = 1e-7;

/// Bisection steps for the fallback; 2^-40 is far below f64 lightness noise
const BISECTION_ITERATIONS: usize = 40;

/// One interior control point, both coordinates in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
}

impl ControlPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn clamped(self) -> Self {
        Self {
            x: clamp_unit(self.x),
            y: clamp_unit(self.y),
        }
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// The two mutable control points of an easing curve
///
/// The endpoints are fixed at (0, 0) and (1, 1) and are not stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierPoints {
    pub cp1: ControlPoint,
    pub cp2: ControlPoint,
}

impl BezierPoints {
    /// Control points on the diagonal: y(x) = x
    pub const LINEAR: BezierPoints = BezierPoints {
        cp1: ControlPoint::new(0.25, 0.25),
        cp2: ControlPoint::new(0.75, 0.75),
    };

    /// CSS `ease-in`
    pub const EASE_IN: BezierPoints = BezierPoints {
        cp1: ControlPoint::new(0.42, 0.0),
        cp2: ControlPoint::new(1.0, 1.0),
    };

    /// CSS `ease-out`
    pub const EASE_OUT: BezierPoints = BezierPoints {
        cp1: ControlPoint::new(0.0, 0.0),
        cp2: ControlPoint::new(0.58, 1.0),
    };

    /// CSS `ease-in-out`
    pub const EASE_IN_OUT: BezierPoints = BezierPoints {
        cp1: ControlPoint::new(0.42, 0.0),
        cp2: ControlPoint::new(0.58, 1.0),
    };

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            cp1: ControlPoint::new(x1, y1),
            cp2: ControlPoint::new(x2, y2),
        }
    }

    /// Look up a named preset (`linear`, `ease-in`, `ease-out`, `ease-in-out`)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "linear" => Some(Self::LINEAR),
            "ease-in" | "ease_in" => Some(Self::EASE_IN),
            "ease-out" | "ease_out" => Some(Self::EASE_OUT),
            "ease-in-out" | "ease_in_out" => Some(Self::EASE_IN_OUT),
            _ => None,
        }
    }

    /// Copy with both control points clamped into the unit square
    pub fn clamped(&self) -> Self {
        Self {
            cp1: self.cp1.clamped(),
            cp2: self.cp2.clamped(),
        }
    }

    /// Eased value at `x`
    pub fn ease(&self, x: f64) -> f64 {
        bezier_y(x, self.cp1, self.cp2)
    }
}

impl Default for BezierPoints {
    fn default() -> Self {
        Self::LINEAR
    }
}

impl fmt::Display for BezierPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.cp1.x, self.cp1.y, self.cp2.x, self.cp2.y
        )
    }
}

/// Error for curve strings that are neither a preset nor four numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BezierParseError(String);

impl fmt::Display for BezierParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid curve '{}': expected a preset (linear, ease-in, ease-out, ease-in-out) or x1,y1,x2,y2",
            self.0
        )
    }
}

impl std::error::Error for BezierParseError {}

impl FromStr for BezierPoints {
    type Err = BezierParseError;

    /// Accepts a preset name or `x1,y1,x2,y2`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(preset) = Self::preset(s.trim()) {
            return Ok(preset);
        }

        let nums: Vec<f64> = s
            .split(',')
            .map(|t| t.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| BezierParseError(s.to_string()))?;

        match nums.as_slice() {
            [x1, y1, x2, y2] => Ok(Self::new(*x1, *y1, *x2, *y2).clamped()),
            _ => Err(BezierParseError(s.to_string())),
        }
    }
}

/// Cubic Bernstein polynomial with coefficients `p0..p3`
#[inline]
pub fn cubic_bezier(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * mt * p0 + 3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t * p3
}

#[inline]
fn cubic_bezier_slope(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * (p1 - p0) + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (p3 - p2)
}

/// Find the curve parameter `t` whose x coordinate is `x`
///
/// Eight Newton-Raphson steps from `t = x`, stopping early on a near-flat
/// tangent. If that leaves `t` outside [0, 1] or misses `x` by more than
/// 1e-7, the answer is recomputed by bisection, which always converges
/// because x(t) is monotone for control points in the unit square.
pub fn solve_bezier_x(x: f64, cp1x: f64, cp2x: f64) -> f64 {
    let mut t = x;
    for _ in 0..NEWTON_ITERATIONS {
        let slope = cubic_bezier_slope(t, 0.0, cp1x, cp2x, 1.0);
        if slope.abs() < MIN_SLOPE {
            break;
        }
        t -= (cubic_bezier(t, 0.0, cp1x, cp2x, 1.0) - x) / slope;
    }

    let residual = (cubic_bezier(t, 0.0, cp1x, cp2x, 1.0) - x).abs();
    if (0.0..=1.0).contains(&t) && residual <= SOLVE_TOLERANCE {
        t
    } else {
        bisect_bezier_x(x, cp1x, cp2x)
    }
}

fn bisect_bezier_x(x: f64, cp1x: f64, cp2x: f64) -> f64 {
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..BISECTION_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        if cubic_bezier(mid, 0.0, cp1x, cp2x, 1.0) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}

/// Eased y for an input x in [0, 1]; the endpoints map to exactly 0 and 1
pub fn bezier_y(x: f64, cp1: ControlPoint, cp2: ControlPoint) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let t = solve_bezier_x(x, cp1.x, cp2.x);
    cubic_bezier(t, 0.0, cp1.y, cp2.y, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_bezier_endpoints() {
        assert_eq!(cubic_bezier(0.0, 0.1, 0.5, 0.7, 0.9), 0.1);
        assert_eq!(cubic_bezier(1.0, 0.1, 0.5, 0.7, 0.9), 0.9);
    }

    #[test]
    fn test_bezier_y_fixed_endpoints() {
        let curves = [
            BezierPoints::LINEAR,
            BezierPoints::EASE_IN,
            BezierPoints::EASE_OUT,
            BezierPoints::EASE_IN_OUT,
            BezierPoints::new(1.0, 0.0, 0.0, 1.0),
            BezierPoints::new(0.0, 1.0, 1.0, 0.0),
        ];
        for curve in curves {
            assert_eq!(bezier_y(0.0, curve.cp1, curve.cp2), 0.0);
            assert_eq!(bezier_y(1.0, curve.cp1, curve.cp2), 1.0);
        }
    }

    #[test]
    fn test_linear_curve_is_identity() {
        for i in 0..=20 {
            let x = i as f64 / 20.0;
            assert!((BezierPoints::LINEAR.ease(x) - x).abs() < 1e-9);
        }
    }

    #[test]
    fn test_solve_bezier_x_inverts_x() {
        let curve = BezierPoints::EASE_IN_OUT;
        for i in 1..20 {
            let x = i as f64 / 20.0;
            let t = solve_bezier_x(x, curve.cp1.x, curve.cp2.x);
            let back = cubic_bezier(t, 0.0, curve.cp1.x, curve.cp2.x, 1.0);
            assert!((back - x).abs() < 1e-7);
        }
    }

    #[test]
    fn test_solve_bezier_x_flat_tangent_falls_back() {
        // x(t) = 3t - 6t^2 + 4t^3 has zero slope at t = 0.5
        for i in 1..50 {
            let x = i as f64 / 50.0;
            let t = solve_bezier_x(x, 1.0, 0.0);
            assert!((0.0..=1.0).contains(&t));
            assert!((cubic_bezier(t, 0.0, 1.0, 0.0, 1.0) - x).abs() < 1e-7);
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric_and_monotone() {
        let curve = BezierPoints::EASE_IN_OUT;
        assert!((curve.ease(0.5) - 0.5).abs() < 1e-6);
        let mut prev = 0.0;
        for i in 1..=100 {
            let y = curve.ease(i as f64 / 100.0);
            assert!(y >= prev);
            prev = y;
        }
        assert!(curve.ease(0.25) < 0.25);
        assert!(curve.ease(0.75) > 0.75);
    }

    #[test]
    fn test_parse_presets_and_numbers() {
        assert_eq!("ease-in-out".parse::<BezierPoints>().unwrap(), BezierPoints::EASE_IN_OUT);
        assert_eq!("Linear".parse::<BezierPoints>().unwrap(), BezierPoints::LINEAR);

        let custom: BezierPoints = "0.1, 0.2, 0.3, 1.4".parse().unwrap();
        assert_eq!(custom, BezierPoints::new(0.1, 0.2, 0.3, 1.0));

        assert!("0.1,0.2,0.3".parse::<BezierPoints>().is_err());
        assert!("bouncy".parse::<BezierPoints>().is_err());
    }
}
