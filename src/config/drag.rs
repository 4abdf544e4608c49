//! Configuration for linear damping per surface.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// One key of the slope drag curve.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    /// Slope angle in degrees.
    pub angle: f32,
    /// Drag at that angle.
    pub drag: f32,
}

impl CurveKey {
    pub const fn new(angle: f32, drag: f32) -> Self {
        Self { angle, drag }
    }
}

/// Piecewise-linear mapping from slope angle (degrees) to drag.
///
/// Keys are kept sorted by angle. Angles outside the key range evaluate to
/// the nearest end key. An empty curve evaluates to `0.0`.
#[derive(Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct SlopeDragCurve {
    keys: Vec<CurveKey>,
}

impl SlopeDragCurve {
    /// Build a curve from keys in any order. Non-finite keys are dropped.
    pub fn new(keys: impl IntoIterator<Item = CurveKey>) -> Self {
        let mut keys: Vec<CurveKey> = keys
            .into_iter()
            .filter(|k| k.angle.is_finite() && k.drag.is_finite())
            .collect();
        keys.sort_by(|a, b| a.angle.total_cmp(&b.angle));
        Self { keys }
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Evaluate the curve at `angle` degrees.
    pub fn evaluate(&self, angle: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if !angle.is_finite() || angle <= first.angle {
            return first.drag;
        }
        if angle >= last.angle {
            return last.drag;
        }

        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if angle <= b.angle {
                let span = b.angle - a.angle;
                if span <= f32::EPSILON {
                    return b.drag;
                }
                let t = (angle - a.angle) / span;
                return a.drag + (b.drag - a.drag) * t;
            }
        }

        last.drag
    }
}

impl Default for SlopeDragCurve {
    fn default() -> Self {
        Self::new([
            CurveKey::new(20.0, 5.0),
            CurveKey::new(25.0, 7.0),
            CurveKey::new(40.0, 10.0),
        ])
    }
}

impl From<Vec<CurveKey>> for SlopeDragCurve {
    fn from(keys: Vec<CurveKey>) -> Self {
        Self::new(keys)
    }
}

impl From<SlopeDragCurve> for Vec<CurveKey> {
    fn from(curve: SlopeDragCurve) -> Self {
        curve.keys
    }
}

/// Linear damping applied to the body depending on where the character is.
#[derive(Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragProfile {
    /// Damping on flat walkable ground.
    pub ground_drag: f32,

    /// Damping while airborne or dashing.
    pub air_drag: f32,

    /// Damping while sliding.
    pub slide_drag: f32,

    /// Damping on slopes, by slope angle.
    pub slope_curve: SlopeDragCurve,
}

impl Default for DragProfile {
    fn default() -> Self {
        Self {
            ground_drag: 5.0,
            air_drag: 0.0,
            slide_drag: 1.0,
            slope_curve: SlopeDragCurve::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_hits_keys_exactly() {
        let curve = SlopeDragCurve::default();
        assert_eq!(curve.evaluate(20.0), 5.0);
        assert_eq!(curve.evaluate(25.0), 7.0);
        assert_eq!(curve.evaluate(40.0), 10.0);
    }

    #[test]
    fn curve_interpolates_between_keys() {
        let curve = SlopeDragCurve::default();
        assert!((curve.evaluate(22.5) - 6.0).abs() < 1e-5);
        assert!((curve.evaluate(30.0) - 8.0).abs() < 1e-5);
    }

    #[test]
    fn curve_clamps_outside_range() {
        let curve = SlopeDragCurve::default();
        assert_eq!(curve.evaluate(5.0), 5.0);
        assert_eq!(curve.evaluate(80.0), 10.0);
        assert_eq!(curve.evaluate(f32::NAN), 5.0);
    }

    #[test]
    fn curve_sorts_unordered_keys() {
        let curve = SlopeDragCurve::new([CurveKey::new(30.0, 3.0), CurveKey::new(10.0, 1.0)]);
        assert_eq!(curve.keys()[0].angle, 10.0);
        assert!((curve.evaluate(20.0) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn empty_curve_is_zero() {
        let curve = SlopeDragCurve::new([]);
        assert_eq!(curve.evaluate(30.0), 0.0);
    }

    #[test]
    fn curve_drops_non_finite_keys() {
        let curve = SlopeDragCurve::new([CurveKey::new(f32::NAN, 1.0), CurveKey::new(10.0, 2.0)]);
        assert_eq!(curve.keys().len(), 1);
        assert_eq!(curve.evaluate(0.0), 2.0);
    }
}
