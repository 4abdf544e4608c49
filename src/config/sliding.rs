//! Configuration for sliding.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Horizontal speed thresholds that start and stop a slide.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SlideThreshold {
    /// One speed both starts (above) and stops (below) the slide.
    ///
    /// Nothing toggles at exactly the threshold, but speeds hovering around
    /// it can start and stop the slide on alternating ticks.
    Shared(f32),
    /// Separate start and stop speeds.
    Hysteresis { start: f32, stop: f32 },
}

impl SlideThreshold {
    /// Speed that must be exceeded to start a slide.
    pub fn start(&self) -> f32 {
        match *self {
            Self::Shared(speed) => speed,
            Self::Hysteresis { start, .. } => start,
        }
    }

    /// Speed below which a slide stops.
    pub fn stop(&self) -> f32 {
        match *self {
            Self::Shared(speed) => speed,
            Self::Hysteresis { stop, .. } => stop,
        }
    }
}

impl Default for SlideThreshold {
    fn default() -> Self {
        Self::Hysteresis {
            start: 6.0,
            stop: 1.0,
        }
    }
}

/// Configuration for sliding.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideConfig {
    /// Start/stop speeds.
    pub thresholds: SlideThreshold,

    /// Vertical scale of the body while sliding.
    pub slide_y_scale: f32,

    /// Forward impulse applied when the slide starts.
    pub impulse: f32,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            thresholds: SlideThreshold::default(),
            slide_y_scale: 0.5,
            impulse: 50.0,
        }
    }
}
