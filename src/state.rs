//! Movement state resolution and drag policy.
//!
//! There is no transition table. Every tick the active state is recomputed
//! from the ability flags and ground contact in a fixed priority order, so
//! the result is always well defined even when several flags are set.

use bevy::prelude::*;

use crate::config::{DragProfile, SpeedProfile};
use crate::slope::SlopeClassification;

/// The single active movement state of a character.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovementState {
    #[default]
    Walking,
    Sprinting,
    Crouching,
    Dashing,
    Sliding,
    Air,
}

/// Ability flags shared by the abilities and read by the state machine.
///
/// Each flag has one writer: sprint and crouch come from input, `dashing`
/// and `gravity_suppressed` from the dash ability, `sliding` from the slide
/// ability.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocomotionFlags {
    sprinting: bool,
    crouching: bool,
    dashing: bool,
    sliding: bool,
    gravity_suppressed: bool,
}

impl LocomotionFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprinting(&self) -> bool {
        self.sprinting
    }

    pub fn crouching(&self) -> bool {
        self.crouching
    }

    pub fn dashing(&self) -> bool {
        self.dashing
    }

    pub fn sliding(&self) -> bool {
        self.sliding
    }

    /// An ability has switched gravity off for the body.
    pub fn gravity_suppressed(&self) -> bool {
        self.gravity_suppressed
    }

    pub fn set_sprinting(&mut self, value: bool) {
        self.sprinting = value;
    }

    pub fn set_crouching(&mut self, value: bool) {
        self.crouching = value;
    }

    pub fn set_dashing(&mut self, value: bool) {
        self.dashing = value;
    }

    pub fn set_sliding(&mut self, value: bool) {
        self.sliding = value;
    }

    pub fn set_gravity_suppressed(&mut self, value: bool) {
        self.gravity_suppressed = value;
    }
}

/// Drag category chosen by the state machine, before the slope override.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Ground,
    Air,
    Slide,
}

/// Output of one state resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateResolution {
    pub state: MovementState,
    /// Target speed for the state. `None` for [`MovementState::Air`], which
    /// keeps whatever target the character had before leaving the ground.
    pub desired_speed: Option<f32>,
    pub drag: DragState,
}

/// Resolve the active state. First match wins:
/// Sliding, Crouching, Sprinting (grounded only), Dashing, Walking (grounded), Air.
pub fn resolve_state(
    flags: &LocomotionFlags,
    grounded: bool,
    speeds: &SpeedProfile,
) -> StateResolution {
    let (state, desired_speed) = if flags.sliding() {
        (MovementState::Sliding, Some(speeds.slide_speed))
    } else if flags.crouching() {
        (MovementState::Crouching, Some(speeds.crouch_speed))
    } else if flags.sprinting() && grounded {
        (MovementState::Sprinting, Some(speeds.sprint_speed))
    } else if flags.dashing() {
        (MovementState::Dashing, Some(speeds.dash_speed))
    } else if grounded {
        (MovementState::Walking, Some(speeds.walk_speed))
    } else {
        (MovementState::Air, None)
    };

    let drag = match state {
        MovementState::Air | MovementState::Dashing => DragState::Air,
        _ if !grounded => DragState::Air,
        MovementState::Sliding => DragState::Slide,
        _ => DragState::Ground,
    };

    StateResolution {
        state,
        desired_speed,
        drag,
    }
}

/// Pick the linear damping for this tick. A slope overrides the state's drag.
pub fn select_drag(drag_state: DragState, slope: &SlopeClassification, profile: &DragProfile) -> f32 {
    if slope.is_slope {
        return profile.slope_curve.evaluate(slope.angle);
    }
    match drag_state {
        DragState::Air => profile.air_drag,
        DragState::Slide => profile.slide_drag,
        DragState::Ground => profile.ground_drag,
    }
}
