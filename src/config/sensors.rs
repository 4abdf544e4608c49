//! Configuration for the downward ground probe.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for ground and slope sensing.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundSensorConfig {
    /// Full standing height of the character. The probe starts at the body
    /// center and reaches half of this plus `margin`.
    pub player_height: f32,

    /// Extra probe length below the feet.
    pub margin: f32,

    /// Collision layers treated as ground.
    pub ground_layers: u32,

    /// Surfaces steeper than this (degrees) are not treated as slopes.
    pub max_slope_angle: f32,
}

impl GroundSensorConfig {
    /// Distance from the body center to the feet.
    pub fn half_height(&self) -> f32 {
        self.player_height * 0.5
    }
}

impl Default for GroundSensorConfig {
    fn default() -> Self {
        Self {
            player_height: 2.0,
            margin: 0.3,
            ground_layers: u32::MAX,
            max_slope_angle: 45.0,
        }
    }
}
