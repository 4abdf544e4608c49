//! The character component and its per-tick pipeline.
//!
//! A frame runs: sense ground, classify slope, run abilities, resolve the
//! state, track the speed limit, then set drag, clamp velocity and pick
//! gravity. Each fixed physics step applies the movement force. The methods
//! here are the pure building blocks; `systems` wires them into Bevy.

use bevy::prelude::*;

use crate::abilities::{AbilityContext, DashAbility, JumpAbility, SlideAbility};
use crate::body::PhysicsBody;
use crate::config::{
    AbilityTuning, DragProfile, ForceConfig, GroundSensorConfig, LocomotionConfig, SpeedProfile,
};
use crate::detection::{sense_ground, GroundProbe, SensorCast};
use crate::force::{apply_movement_force, clamp_velocity, resolve_gravity, MovementFrame};
use crate::fov::FieldOfViewEffect;
use crate::intent::{Heading, MovementInput};
use crate::slope::{classify, SlopeClassification};
use crate::speed::SpeedController;
use crate::state::{resolve_state, select_drag, DragState, LocomotionFlags, MovementState};

/// Locomotion state of one first-person character.
///
/// Position and velocity live on the physics body; this component only holds
/// what the controller derives from them.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use fp_locomotion::prelude::*;
///
/// let mut character = Character::default();
/// let config = LocomotionConfig::default();
/// character.sense(&GroundPlane::flat(0.0), Vec3::new(0.0, 1.0, 0.0), &config.sensor);
/// assert!(character.grounded);
///
/// let desired = character.resolve(&config.speed);
/// assert_eq!(character.state, MovementState::Walking);
/// assert_eq!(desired, 5.0);
/// ```
#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
#[require(
    MovementInput,
    Heading,
    LocomotionConfig,
    DashAbility,
    JumpAbility,
    SlideAbility
)]
pub struct Character {
    /// Active movement state.
    pub state: MovementState,
    /// Ability flags read by the state machine.
    pub flags: LocomotionFlags,
    /// Whether the ground probe hit this tick.
    pub grounded: bool,
    /// The ground probe's hit, if any.
    pub ground: Option<SensorCast>,
    /// Classification of the surface under the character.
    pub slope: SlopeClassification,
    /// Drag category picked by the last resolution.
    pub drag: DragState,
    /// Speed limit and its smoothing.
    pub speed: SpeedController,
}

impl Default for Character {
    fn default() -> Self {
        Self::new(&SpeedProfile::default())
    }
}

impl Character {
    /// A character standing still with its speed limit at walking speed.
    pub fn new(speeds: &SpeedProfile) -> Self {
        Self {
            state: MovementState::Walking,
            flags: LocomotionFlags::new(),
            grounded: false,
            ground: None,
            slope: SlopeClassification::NONE,
            drag: DragState::Ground,
            speed: SpeedController::at(speeds.walk_speed),
        }
    }

    /// Whether the character stands on a walkable slope.
    pub fn on_slope(&self) -> bool {
        self.slope.is_slope
    }

    /// Normal of the ground below, if grounded.
    pub fn ground_normal(&self) -> Option<Vec3> {
        self.ground.map(|hit| hit.normal)
    }

    /// Probe the ground below a body centered at `position`.
    pub fn sense(&mut self, probe: &impl GroundProbe, position: Vec3, config: &GroundSensorConfig) {
        let hit = sense_ground(probe, position, config.half_height(), config);
        self.set_ground(hit, config);
    }

    /// Record a ground probe result and classify the surface.
    pub fn set_ground(&mut self, hit: Option<SensorCast>, config: &GroundSensorConfig) {
        self.ground = hit;
        self.grounded = hit.is_some();
        self.slope = hit
            .map(|hit| classify(hit.normal, config.max_slope_angle))
            .unwrap_or(SlopeClassification::NONE);
    }

    /// Copy the level-triggered sprint and crouch buttons into the flags.
    pub fn apply_posture_input(&mut self, input: &MovementInput) {
        self.flags.set_sprinting(input.sprint_held);
        self.flags.set_crouching(input.crouch_held);
    }

    /// Borrow what the abilities need for one tick.
    pub fn ability_context<'a>(
        &'a mut self,
        input: &'a MovementInput,
        heading: &'a Heading,
        body: &'a mut dyn PhysicsBody,
        fov: &'a mut dyn FieldOfViewEffect,
    ) -> AbilityContext<'a> {
        AbilityContext {
            input,
            heading,
            grounded: self.grounded,
            flags: &mut self.flags,
            body,
            fov,
        }
    }

    /// Recompute the movement state and return the desired speed.
    ///
    /// In the air the desired speed carried from the previous state is kept.
    pub fn resolve(&mut self, speeds: &SpeedProfile) -> f32 {
        let resolution = resolve_state(&self.flags, self.grounded, speeds);
        if resolution.state != self.state {
            trace!(from = ?self.state, to = ?resolution.state, "movement state");
        }
        self.state = resolution.state;
        self.drag = resolution.drag;
        resolution.desired_speed.unwrap_or(self.speed.desired())
    }

    /// Track `desired` with the speed limit over `dt` seconds.
    pub fn update_speed(&mut self, desired: f32, dt: f32, speeds: &SpeedProfile) {
        self.speed.update(desired, dt, speeds.smoothing_threshold);
    }

    /// Linear damping for the current state and surface.
    pub fn linear_damping(&self, drag: &DragProfile) -> f32 {
        select_drag(self.drag, &self.slope, drag)
    }

    /// Set `damping`, clamp velocity and switch gravity for this frame.
    pub fn control_body(&self, damping: f32, body: &mut dyn PhysicsBody) {
        body.set_linear_damping(damping);
        clamp_velocity(body, self.speed.current(), self.slope.is_slope);
        body.set_gravity_enabled(resolve_gravity(&self.flags, self.slope.is_slope));
    }

    /// State resolution, speed tracking and body control in one call.
    pub fn settle(&mut self, dt: f32, config: &LocomotionConfig, body: &mut dyn PhysicsBody) {
        let desired = self.resolve(&config.speed);
        self.update_speed(desired, dt, &config.speed);
        self.control_body(self.linear_damping(&config.drag), body);
    }

    /// Apply this fixed step's movement force.
    pub fn apply_movement(
        &self,
        input: &MovementInput,
        heading: &Heading,
        speeds: &SpeedProfile,
        gains: &ForceConfig,
        body: &mut dyn PhysicsBody,
    ) {
        let frame = MovementFrame {
            input,
            heading,
            slope: &self.slope,
            flags: &self.flags,
            grounded: self.grounded,
            current_speed: self.speed.current(),
            desired_speed: self.speed.desired(),
        };
        apply_movement_force(&frame, speeds, gains, body);
    }
}

/// Run the abilities for one tick at time `now`: dash, then jump, then slide.
pub fn run_abilities(
    now: f32,
    tuning: &AbilityTuning,
    ctx: &mut AbilityContext<'_>,
    dash: &mut DashAbility,
    jump: &mut JumpAbility,
    slide: &mut SlideAbility,
) {
    dash.update(now, &tuning.dash, ctx);
    jump.update(now, &tuning.jump, ctx);
    slide.update(&tuning.slide, ctx);
}
