//! Locomotion configuration.
//!
//! Every tunable lives in a small per-concern struct; [`LocomotionConfig`]
//! aggregates them into the component attached to a character. All values
//! are static for the lifetime of the character.

mod dash;
mod drag;
mod force;
mod jumping;
mod sensors;
mod sliding;
mod speed;

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub use dash::DashConfig;
pub use drag::{CurveKey, DragProfile, SlopeDragCurve};
pub use force::ForceConfig;
pub use jumping::JumpConfig;
pub use sensors::GroundSensorConfig;
pub use sliding::{SlideConfig, SlideThreshold};
pub use speed::SpeedProfile;

/// Complete locomotion tuning for one character.
///
/// # Example
///
/// ```rust
/// use fp_locomotion::prelude::*;
///
/// let config = LocomotionConfig::from_ron_str("(speed: (walk_speed: 4.0))").unwrap();
/// assert_eq!(config.speed.walk_speed, 4.0);
/// assert_eq!(config.speed.sprint_speed, 7.5);
/// ```
#[derive(Component, Reflect, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct LocomotionConfig {
    pub speed: SpeedProfile,
    pub drag: DragProfile,
    pub sensor: GroundSensorConfig,
    pub force: ForceConfig,
    pub dash: DashConfig,
    pub jump: JumpConfig,
    pub slide: SlideConfig,
}

/// The per-ability slices of a [`LocomotionConfig`], copied out as one value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityTuning {
    pub dash: DashConfig,
    pub jump: JumpConfig,
    pub slide: SlideConfig,
}

impl LocomotionConfig {
    pub fn abilities(&self) -> AbilityTuning {
        AbilityTuning {
            dash: self.dash,
            jump: self.jump,
            slide: self.slide,
        }
    }

    /// Parse a RON document. Missing fields keep their defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::de::from_str(source).map_err(|e| ConfigError::Ron(e.to_string()))?;
        if let Err(err) = config.validate() {
            warn!("rejected locomotion config: {err}");
            return Err(err);
        }
        Ok(config)
    }

    /// Read and parse a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    /// Reject values that would corrupt the simulation.
    ///
    /// Degenerate-but-meaningful values (a `max_slope_angle` of zero, zero
    /// dash charges) are accepted; they simply disable the feature.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let speed = &self.speed;
        non_negative("speed.walk_speed", speed.walk_speed)?;
        non_negative("speed.sprint_speed", speed.sprint_speed)?;
        non_negative("speed.crouch_speed", speed.crouch_speed)?;
        non_negative("speed.dash_speed", speed.dash_speed)?;
        non_negative("speed.slide_speed", speed.slide_speed)?;
        non_negative("speed.air_control", speed.air_control)?;
        non_negative("speed.smoothing_threshold", speed.smoothing_threshold)?;

        non_negative("drag.ground_drag", self.drag.ground_drag)?;
        non_negative("drag.air_drag", self.drag.air_drag)?;
        non_negative("drag.slide_drag", self.drag.slide_drag)?;
        if self.drag.slope_curve.keys().iter().any(|k| k.drag < 0.0) {
            return Err(ConfigError::invalid(
                "drag.slope_curve",
                "drag keys must not be negative",
            ));
        }

        non_negative("sensor.player_height", self.sensor.player_height)?;
        non_negative("sensor.margin", self.sensor.margin)?;
        finite("sensor.max_slope_angle", self.sensor.max_slope_angle)?;

        non_negative("force.ground_gain", self.force.ground_gain)?;
        non_negative("force.slope_gain", self.force.slope_gain)?;
        non_negative("force.slope_pin_force", self.force.slope_pin_force)?;

        let dash = &self.dash;
        non_negative("dash.cooldown", dash.cooldown)?;
        non_negative("dash.recharge_time", dash.recharge_time)?;
        non_negative("dash.duration", dash.duration)?;
        non_negative("dash.force", dash.force)?;
        finite("dash.normal_fov", dash.normal_fov)?;
        finite("dash.dash_fov", dash.dash_fov)?;

        non_negative("jump.impulse", self.jump.impulse)?;
        non_negative("jump.cooldown", self.jump.cooldown)?;

        non_negative("slide.thresholds.start", self.slide.thresholds.start())?;
        non_negative("slide.thresholds.stop", self.slide.thresholds.stop())?;
        non_negative("slide.slide_y_scale", self.slide.slide_y_scale)?;
        non_negative("slide.impulse", self.slide.impulse)?;

        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is not finite")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::invalid(field, format!("{value} is negative")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(LocomotionConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_ron_yields_defaults() {
        let config = LocomotionConfig::from_ron_str("()").unwrap();
        assert_eq!(config, LocomotionConfig::default());
    }

    #[test]
    fn partial_ron_overrides_fields() {
        let config = LocomotionConfig::from_ron_str(
            "(dash: (max_dash_amount: 3, omnidirectional: true), slide: (thresholds: Shared(5.0)))",
        )
        .unwrap();
        assert_eq!(config.dash.max_dash_amount, 3);
        assert!(config.dash.omnidirectional);
        assert_eq!(config.dash.cooldown, 0.3);
        assert_eq!(config.slide.thresholds, SlideThreshold::Shared(5.0));
    }

    #[test]
    fn slope_curve_parses_from_key_list() {
        let config = LocomotionConfig::from_ron_str(
            "(drag: (slope_curve: [(angle: 30.0, drag: 2.0), (angle: 10.0, drag: 1.0)]))",
        )
        .unwrap();
        let keys = config.drag.slope_curve.keys();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].angle, 10.0);
    }

    #[test]
    fn malformed_ron_is_rejected() {
        let err = LocomotionConfig::from_ron_str("(speed: (walk_speed: ))").unwrap_err();
        assert!(matches!(err, ConfigError::Ron(_)));
    }

    #[test]
    fn negative_speed_is_rejected() {
        let err = LocomotionConfig::from_ron_str("(speed: (walk_speed: -1.0))").unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "speed.walk_speed"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_slope_angle_is_accepted() {
        let mut config = LocomotionConfig::default();
        config.sensor.max_slope_angle = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_finite_value_is_rejected() {
        let mut config = LocomotionConfig::default();
        config.dash.duration = f32::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn ability_tuning_copies_each_ability_slice() {
        let mut config = LocomotionConfig::default();
        config.dash.max_dash_amount = 4;
        config.jump.max_jumps = 2;
        let tuning = config.abilities();
        assert_eq!(tuning.dash, config.dash);
        assert_eq!(tuning.jump.max_jumps, 2);
        assert_eq!(tuning.slide, config.slide);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = LocomotionConfig::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
