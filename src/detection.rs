//! Ground sensing.
//!
//! A single downward cast from the body center decides whether the character
//! is grounded and which surface normal it stands on. The result is valid for
//! the tick it was sampled in only.

use bevy::prelude::*;

use crate::config::GroundSensorConfig;

/// Result of a downward cast that hit something (the per-tick slope hit).
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct SensorCast {
    /// Distance from the cast origin to the hit point.
    pub distance: f32,
    /// Normal of the surface at the hit point.
    pub normal: Vec3,
    /// World position of the hit point.
    pub point: Vec3,
    /// Entity that was hit (if any).
    pub entity: Option<Entity>,
}

impl SensorCast {
    /// Create a hit result.
    pub fn hit(distance: f32, normal: Vec3, point: Vec3, entity: Option<Entity>) -> Self {
        Self {
            distance,
            normal,
            point,
            entity,
        }
    }
}

/// Something that can cast a ray straight down.
///
/// Implementations must be pure queries: casting twice with the same
/// arguments in the same tick returns the same answer.
pub trait GroundProbe {
    /// Cast from `origin` along -Y up to `max_distance`, only against
    /// surfaces in `layers`.
    fn cast_down(&self, origin: Vec3, max_distance: f32, layers: u32) -> Option<SensorCast>;
}

/// Probe the ground below a body centered at `position` whose feet are
/// `half_height` below the center.
///
/// Returns `None` when nothing walkable is within `half_height + margin`.
pub fn sense_ground(
    probe: &impl GroundProbe,
    position: Vec3,
    half_height: f32,
    config: &GroundSensorConfig,
) -> Option<SensorCast> {
    let range = half_height + config.margin;
    if !range.is_finite() || range <= 0.0 {
        return None;
    }
    probe
        .cast_down(position, range, config.ground_layers)
        .filter(|hit| hit.distance <= range && hit.normal.is_finite())
}

/// Infinite analytic plane, usable as a [`GroundProbe`] in headless setups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    /// Any point on the plane.
    pub point: Vec3,
    /// Plane normal (normalized on construction).
    pub normal: Vec3,
    /// Collision layers this plane belongs to.
    pub layers: u32,
}

impl GroundPlane {
    /// Horizontal floor at height `y`.
    pub fn flat(y: f32) -> Self {
        Self::new(Vec3::new(0.0, y, 0.0), Vec3::Y)
    }

    /// Plane through `point` with `normal`. A zero normal falls back to +Y.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.try_normalize().unwrap_or(Vec3::Y),
            layers: u32::MAX,
        }
    }

    /// Plane through `point` tilted `degrees` away from +Y around the X axis.
    pub fn inclined(point: Vec3, degrees: f32) -> Self {
        let normal = Quat::from_rotation_x(degrees.to_radians()) * Vec3::Y;
        Self::new(point, normal)
    }

    pub fn with_layers(mut self, layers: u32) -> Self {
        self.layers = layers;
        self
    }
}

impl GroundProbe for GroundPlane {
    fn cast_down(&self, origin: Vec3, max_distance: f32, layers: u32) -> Option<SensorCast> {
        if self.layers & layers == 0 {
            return None;
        }
        let facing = Vec3::NEG_Y.dot(self.normal);
        if facing >= 0.0 {
            // Ray runs parallel to or away from the plane's front face.
            return None;
        }
        let distance = (self.point - origin).dot(self.normal) / facing;
        if !(0.0..=max_distance).contains(&distance) {
            return None;
        }
        let point = origin + Vec3::NEG_Y * distance;
        Some(SensorCast::hit(distance, self.normal, point, None))
    }
}
