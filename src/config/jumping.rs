//! Configuration for jumping and multi-jumps.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for jumping.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    /// Upward impulse applied after vertical velocity is zeroed.
    pub impulse: f32,

    /// Seconds before another jump is accepted.
    pub cooldown: f32,

    /// Jumps available before ground contact refills the pool.
    pub max_jumps: u32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            impulse: 5.0,
            cooldown: 0.25,
            max_jumps: 1,
        }
    }
}
