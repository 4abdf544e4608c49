//! Force application, velocity clamping and gravity selection.

use bevy::prelude::*;

use crate::body::{ForceMode, PhysicsBody};
use crate::config::{ForceConfig, SpeedProfile};
use crate::intent::{Heading, MovementInput};
use crate::slope::SlopeClassification;
use crate::state::LocomotionFlags;

/// Everything the movement force depends on for one physics step.
#[derive(Debug, Clone, Copy)]
pub struct MovementFrame<'a> {
    pub input: &'a MovementInput,
    pub heading: &'a Heading,
    pub slope: &'a SlopeClassification,
    pub flags: &'a LocomotionFlags,
    pub grounded: bool,
    /// Active (smoothed) speed limit.
    pub current_speed: f32,
    /// Unsmoothed target of the current state.
    pub desired_speed: f32,
}

/// Apply this step's movement force.
///
/// On a slope the body is pushed along the slope direction by the forward
/// axis and, when it is moving vertically while walking forward or back, held
/// down against the surface. Directional force is added only while the
/// horizontal speed is below the desired speed: `ground_gain` times the speed
/// on the ground, the speed times `air_control` alone in the air and nothing
/// at all while sliding.
pub fn apply_movement_force(
    frame: &MovementFrame<'_>,
    speeds: &SpeedProfile,
    gains: &ForceConfig,
    body: &mut dyn PhysicsBody,
) {
    let forward = frame.input.forward();

    if let Some(direction) = frame.slope.direction() {
        let assist = direction * forward * frame.current_speed * gains.slope_gain;
        if assist != Vec3::ZERO {
            body.add_force(assist, ForceMode::Force);
        }
        if body.velocity().y != 0.0 && forward != 0.0 {
            body.add_force(Vec3::NEG_Y * gains.slope_pin_force, ForceMode::Force);
        }
    }

    if frame.flags.sliding() || body.horizontal_speed() >= frame.desired_speed {
        return;
    }

    let gain = if frame.grounded {
        gains.ground_gain
    } else {
        speeds.air_control
    };
    let force = frame.heading.planar(frame.input.move_axis) * frame.current_speed * gain;
    if force != Vec3::ZERO {
        body.add_force(force, ForceMode::Force);
    }
}

/// Cap the body's speed at `limit`.
///
/// On a slope the full 3D velocity is capped; elsewhere only the XZ
/// component is, leaving vertical velocity untouched.
pub fn clamp_velocity(body: &mut dyn PhysicsBody, limit: f32, on_slope: bool) {
    let limit = limit.max(0.0);
    let velocity = body.velocity();

    if on_slope {
        if velocity.length() > limit {
            body.set_velocity(velocity.normalize_or_zero() * limit);
        }
        return;
    }

    let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
    if horizontal.length() > limit {
        let capped = horizontal.normalize_or_zero() * limit;
        body.set_velocity(Vec3::new(capped.x, velocity.y, capped.z));
    }
}

/// Whether gravity should act on the body this tick.
///
/// Sliding always keeps gravity. Otherwise a slope or an ability that
/// suppressed gravity switches it off.
pub fn resolve_gravity(flags: &LocomotionFlags, on_slope: bool) -> bool {
    if flags.sliding() {
        return true;
    }
    !(on_slope || flags.gravity_suppressed())
}
