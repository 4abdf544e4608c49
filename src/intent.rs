//! Input snapshot and facing components.
//!
//! The input device layer and the camera-look layer live outside this crate.
//! They write [`MovementInput`] and [`Heading`] once per frame; the
//! locomotion systems only read them.

use bevy::prelude::*;

/// Per-tick snapshot of the player's movement input.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use fp_locomotion::prelude::*;
///
/// let mut input = MovementInput::new();
/// input.set_move_axis(Vec2::new(0.0, 2.0));
/// assert_eq!(input.move_axis, Vec2::Y);
/// assert!(input.is_moving());
///
/// input.clear();
/// assert!(!input.is_moving());
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct MovementInput {
    /// Strafe (x) and forward (y) axes, each in `[-1, 1]`.
    pub move_axis: Vec2,
    /// Sprint button held.
    pub sprint_held: bool,
    /// Crouch button held.
    pub crouch_held: bool,
    /// Dash button pressed.
    pub dash_pressed: bool,
    /// Jump button pressed.
    pub jump_pressed: bool,
    /// Slide button held.
    pub slide_held: bool,
}

impl MovementInput {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the movement axes, clamping each to `[-1, 1]`. NaN reads as zero.
    pub fn set_move_axis(&mut self, axis: Vec2) {
        let clamp = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) };
        self.move_axis = Vec2::new(clamp(axis.x), clamp(axis.y));
    }

    /// Release every button and center the axes.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check if there is any directional input.
    pub fn is_moving(&self) -> bool {
        self.move_axis != Vec2::ZERO
    }

    /// Forward axis (-1 back, 1 forward).
    pub fn forward(&self) -> f32 {
        self.move_axis.y
    }

    /// Strafe axis (-1 left, 1 right).
    pub fn strafe(&self) -> f32 {
        self.move_axis.x
    }
}

/// Facing of the character, written by the camera-look collaborator.
///
/// Bevy convention: +X right, +Y up, -Z forward. `yaw` turns around +Y,
/// `pitch` tilts the look direction up (positive) or down.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct Heading {
    pub yaw: f32,
    pub pitch: f32,
}

impl Heading {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Horizontal forward direction.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Horizontal right direction.
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Full look direction including pitch.
    pub fn look(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(
            -self.yaw.sin() * cos_pitch,
            sin_pitch,
            -self.yaw.cos() * cos_pitch,
        )
    }

    /// World-space horizontal direction for a strafe/forward axis pair.
    ///
    /// Not normalized: diagonal input is longer than one, matching how the
    /// axes are summed into force.
    pub fn planar(&self, axis: Vec2) -> Vec3 {
        self.forward() * axis.y + self.right() * axis.x
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    // ==================== MovementInput Tests ====================

    #[test]
    fn movement_input_new_is_idle() {
        let input = MovementInput::new();
        assert_eq!(input.move_axis, Vec2::ZERO);
        assert!(!input.sprint_held);
        assert!(!input.dash_pressed);
        assert!(!input.is_moving());
    }

    #[test]
    fn movement_input_clamps_axes() {
        let mut input = MovementInput::new();
        input.set_move_axis(Vec2::new(-3.0, 0.5));
        assert_eq!(input.strafe(), -1.0);
        assert_eq!(input.forward(), 0.5);
    }

    #[test]
    fn movement_input_nan_reads_as_zero() {
        let mut input = MovementInput::new();
        input.set_move_axis(Vec2::new(f32::NAN, 1.0));
        assert_eq!(input.move_axis, Vec2::Y);
    }

    #[test]
    fn movement_input_clear_releases_buttons() {
        let mut input = MovementInput {
            move_axis: Vec2::ONE,
            sprint_held: true,
            crouch_held: true,
            dash_pressed: true,
            jump_pressed: true,
            slide_held: true,
        };
        input.clear();
        assert_eq!(input, MovementInput::default());
    }

    // ==================== Heading Tests ====================

    #[test]
    fn heading_default_faces_negative_z() {
        let heading = Heading::default();
        assert!(approx(heading.forward(), Vec3::NEG_Z));
        assert!(approx(heading.right(), Vec3::X));
        assert!(approx(heading.look(), Vec3::NEG_Z));
    }

    #[test]
    fn heading_yaw_rotates_basis() {
        let heading = Heading::new(FRAC_PI_2, 0.0);
        assert!(approx(heading.forward(), Vec3::NEG_X));
        assert!(approx(heading.right(), Vec3::NEG_Z));
    }

    #[test]
    fn heading_pitch_only_affects_look() {
        let heading = Heading::new(0.0, FRAC_PI_2);
        assert!(approx(heading.forward(), Vec3::NEG_Z));
        assert!(approx(heading.look(), Vec3::Y));
    }

    #[test]
    fn heading_planar_combines_axes() {
        let heading = Heading::default();
        let dir = heading.planar(Vec2::new(1.0, 1.0));
        assert!(approx(dir, Vec3::new(1.0, 0.0, -1.0)));
    }
}
