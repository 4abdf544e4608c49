//! Configuration for the dash ability.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for the dash ability.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Minimum seconds between consecutive dashes, given a charge is available.
    pub cooldown: f32,

    /// Seconds until a used charge comes back.
    pub recharge_time: f32,

    /// How long a dash lasts in seconds.
    pub duration: f32,

    /// Base impulse strength.
    pub force: f32,

    /// Maximum number of charges held. Charges start full.
    pub max_dash_amount: u32,

    /// Dash along the movement input (up when neutral) instead of the look direction.
    pub omnidirectional: bool,

    /// Keep gravity on during the dash.
    pub use_gravity: bool,

    /// Ease the camera field of view while dashing.
    pub change_fov: bool,

    /// Field of view outside of a dash (degrees).
    pub normal_fov: f32,

    /// Field of view during a dash (degrees).
    pub dash_fov: f32,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            cooldown: 0.3,
            recharge_time: 2.5,
            duration: 0.35,
            force: 3.0,
            max_dash_amount: 1,
            omnidirectional: false,
            use_gravity: false,
            change_fov: true,
            normal_fov: 60.0,
            dash_fov: 95.0,
        }
    }
}
