//! Slope classification from a ground normal.

use bevy::prelude::*;

/// How the surface under the character should be treated this tick.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default)]
pub struct SlopeClassification {
    /// The surface is a walkable slope (not flat, not too steep).
    pub is_slope: bool,
    /// Angle between world up and the surface normal, in degrees.
    pub angle: f32,
    /// World up projected onto the surface plane, normalized.
    /// `Vec3::ZERO` whenever `is_slope` is false.
    pub direction: Vec3,
}

impl SlopeClassification {
    /// Classification used when there is no ground below the character.
    pub const NONE: Self = Self {
        is_slope: false,
        angle: 0.0,
        direction: Vec3::ZERO,
    };

    /// Slope direction if this is a slope.
    pub fn direction(&self) -> Option<Vec3> {
        self.is_slope.then_some(self.direction)
    }
}

/// Classify a surface by its normal against `max_angle` degrees.
///
/// A surface is a slope when its angle from world up is nonzero and below
/// `max_angle`. Flat ground, steep walls, zero-length or non-finite normals
/// and non-positive limits all classify as "not a slope" with no direction.
pub fn classify(normal: Vec3, max_angle: f32) -> SlopeClassification {
    let Some(normal) = normal.try_normalize() else {
        return SlopeClassification::NONE;
    };
    let angle = Vec3::Y.angle_between(normal).to_degrees();
    if !angle.is_finite() {
        return SlopeClassification::NONE;
    }

    let is_slope = angle < max_angle && angle != 0.0;
    if !is_slope {
        return SlopeClassification {
            angle,
            ..SlopeClassification::NONE
        };
    }

    let projected = Vec3::Y.reject_from_normalized(normal);
    match projected.try_normalize() {
        Some(direction) => SlopeClassification {
            is_slope: true,
            angle,
            direction,
        },
        None => SlopeClassification {
            angle,
            ..SlopeClassification::NONE
        },
    }
}
