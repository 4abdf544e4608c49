//! Configuration for movement force gains.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Gains used by the force integrator.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    /// Directional force per unit of speed on the ground.
    pub ground_gain: f32,

    /// Force per unit of speed applied along the slope direction.
    pub slope_gain: f32,

    /// Downward force pinning the body to a slope while moving on it.
    pub slope_pin_force: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            ground_gain: 10.0,
            slope_gain: 30.0,
            slope_pin_force: 80.0,
        }
    }
}
