//! Configuration for per-state target speeds.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Target speed for each movement state.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedProfile {
    /// Max speed while walking (units/second).
    pub walk_speed: f32,

    /// Max speed while sprinting (units/second).
    pub sprint_speed: f32,

    /// Max speed while crouching (units/second).
    pub crouch_speed: f32,

    /// Max speed while dashing (units/second).
    pub dash_speed: f32,

    /// Max speed while sliding (units/second).
    pub slide_speed: f32,

    /// How much the player can steer while airborne (multiplier on the speed limit).
    pub air_control: f32,

    /// A drop in desired speed larger than this is eased instead of snapped.
    pub smoothing_threshold: f32,
}

impl Default for SpeedProfile {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            sprint_speed: 7.5,
            crouch_speed: 3.5,
            dash_speed: 20.0,
            slide_speed: 20.0,
            air_control: 0.25,
            smoothing_threshold: 4.0,
        }
    }
}
