//! Slide posture and momentum.

use bevy::prelude::*;

use super::AbilityContext;
use crate::body::ForceMode;
use crate::config::SlideConfig;

/// Speed-gated slide.
///
/// Starts when the slide button is held above the start speed, squashing
/// the body to `slide_y_scale` and pushing it forward. Stops as soon as the
/// button is released or the horizontal speed falls below the stop speed,
/// restoring the exact scale the body had before.
#[derive(Component, Reflect, Debug, Clone, Default, PartialEq)]
#[reflect(Component)]
pub struct SlideAbility {
    standing_scale: Option<f32>,
}

impl SlideAbility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertical scale to restore when the running slide ends.
    pub fn standing_scale(&self) -> Option<f32> {
        self.standing_scale
    }

    /// Run one tick.
    pub fn update(&mut self, config: &SlideConfig, ctx: &mut AbilityContext<'_>) {
        let speed = ctx.body.horizontal_speed();
        let held = ctx.input.slide_held;

        if !ctx.flags.sliding() {
            if held && speed > config.thresholds.start() {
                self.start(config, ctx);
            }
        } else if !held || speed < config.thresholds.stop() {
            self.stop(ctx);
        }
    }

    fn start(&mut self, config: &SlideConfig, ctx: &mut AbilityContext<'_>) {
        self.standing_scale = Some(ctx.body.vertical_scale());
        ctx.body.set_vertical_scale(config.slide_y_scale);
        ctx.body
            .add_force(ctx.heading.forward() * config.impulse, ForceMode::Impulse);
        ctx.flags.set_sliding(true);
        debug!(speed = ctx.body.horizontal_speed(), "slide started");
    }

    fn stop(&mut self, ctx: &mut AbilityContext<'_>) {
        if let Some(scale) = self.standing_scale.take() {
            ctx.body.set_vertical_scale(scale);
        }
        ctx.flags.set_sliding(false);
        debug!(speed = ctx.body.horizontal_speed(), "slide stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::test_support::Rig;
    use crate::config::SlideThreshold;

    fn moving(speed: f32) -> Rig {
        let mut rig = Rig::new();
        rig.body.velocity = Vec3::NEG_Z * speed;
        rig.input.slide_held = true;
        rig
    }

    #[test]
    fn starts_above_threshold() {
        let config = SlideConfig::default();
        let mut slide = SlideAbility::new();
        let mut rig = moving(10.0);

        slide.update(&config, &mut rig.ctx());
        assert!(rig.flags.sliding());
        assert_eq!(rig.body.vertical_scale, 0.5);
        assert!((rig.body.velocity.z + 60.0).abs() < 1e-4);
    }

    #[test]
    fn too_slow_to_start() {
        let config = SlideConfig::default();
        let mut slide = SlideAbility::new();
        let mut rig = moving(5.0);

        slide.update(&config, &mut rig.ctx());
        assert!(!rig.flags.sliding());
        assert_eq!(rig.body.vertical_scale, 1.0);
    }

    #[test]
    fn stops_when_slow_and_restores_exact_scale() {
        let config = SlideConfig::default();
        let mut slide = SlideAbility::new();
        let mut rig = moving(10.0);
        rig.body.vertical_scale = 1.37;

        slide.update(&config, &mut rig.ctx());
        assert!(rig.flags.sliding());

        rig.body.velocity = Vec3::NEG_Z * 2.0;
        slide.update(&config, &mut rig.ctx());
        assert!(rig.flags.sliding());

        rig.body.velocity = Vec3::NEG_Z * 0.9;
        slide.update(&config, &mut rig.ctx());
        assert!(!rig.flags.sliding());
        assert_eq!(rig.body.vertical_scale, 1.37);
        assert_eq!(slide.standing_scale(), None);
    }

    #[test]
    fn release_stops_immediately() {
        let config = SlideConfig::default();
        let mut slide = SlideAbility::new();
        let mut rig = moving(10.0);

        slide.update(&config, &mut rig.ctx());
        rig.input.slide_held = false;
        slide.update(&config, &mut rig.ctx());
        assert!(!rig.flags.sliding());
        assert_eq!(rig.body.vertical_scale, 1.0);
    }

    #[test]
    fn shared_threshold_is_stable_at_boundary() {
        let config = SlideConfig {
            thresholds: SlideThreshold::Shared(4.0),
            impulse: 0.0,
            ..default()
        };
        let mut slide = SlideAbility::new();

        let mut rig = moving(4.0);
        slide.update(&config, &mut rig.ctx());
        assert!(!rig.flags.sliding());

        rig.body.velocity = Vec3::NEG_Z * 4.5;
        slide.update(&config, &mut rig.ctx());
        assert!(rig.flags.sliding());

        rig.body.velocity = Vec3::NEG_Z * 4.0;
        slide.update(&config, &mut rig.ctx());
        assert!(rig.flags.sliding());

        rig.body.velocity = Vec3::NEG_Z * 3.9;
        slide.update(&config, &mut rig.ctx());
        assert!(!rig.flags.sliding());
    }
}
