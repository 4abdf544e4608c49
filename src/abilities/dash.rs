//! Charge-gated dash with cooldown, recharge and field-of-view kick.
//!
//! All timing runs on the ability's own [`ScheduledEvents`] queue.

use bevy::prelude::*;

use super::AbilityContext;
use crate::body::ForceMode;
use crate::config::DashConfig;
use crate::timers::ScheduledEvents;

/// Deferred dash bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashEvent {
    /// The dash has run for its full duration.
    End,
    /// One charge comes back.
    Recharge,
    /// The cooldown between dashes is over.
    Enable,
}

/// Charge-gated dash.
///
/// A dash needs a charge and an elapsed cooldown. Triggering sets the
/// `dashing` flag, optionally suppresses gravity, applies an impulse and
/// schedules three independent events: the end of the dash, the return of
/// the spent charge, and the end of the cooldown.
///
/// Dashes can overlap when the cooldown is shorter than the duration. The
/// flag stays up and gravity stays as it was before the first dash until
/// the last overlapping dash ends.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct DashAbility {
    charges: u32,
    can_dash: bool,
    active: u32,
    gravity_before: bool,
    events: ScheduledEvents<DashEvent>,
}

impl Default for DashAbility {
    fn default() -> Self {
        Self::new(&DashConfig::default())
    }
}

impl DashAbility {
    /// Fresh ability with a full charge pool.
    pub fn new(config: &DashConfig) -> Self {
        Self {
            charges: config.max_dash_amount,
            can_dash: true,
            active: 0,
            gravity_before: true,
            events: ScheduledEvents::new(),
        }
    }

    /// Refill the charge pool for `config` and end the cooldown.
    ///
    /// Dashes already running keep their pending end, so their flags and
    /// gravity are still restored on time.
    pub fn refill(&mut self, config: &DashConfig) {
        self.charges = config.max_dash_amount;
        self.can_dash = true;
        self.events.retain(|event| *event == DashEvent::End);
    }

    pub fn charges(&self) -> u32 {
        self.charges
    }

    /// The cooldown since the last dash has elapsed.
    pub fn can_dash(&self) -> bool {
        self.can_dash
    }

    /// Number of dashes still running.
    pub fn active(&self) -> u32 {
        self.active
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Run one tick at time `now`. Returns whether a dash started.
    pub fn update(&mut self, now: f32, config: &DashConfig, ctx: &mut AbilityContext<'_>) -> bool {
        for event in self.events.drain_due(now) {
            self.handle(event, config, ctx);
        }

        if !ctx.input.dash_pressed || !self.can_dash || self.charges == 0 {
            return false;
        }
        self.trigger(now, config, ctx);
        true
    }

    fn trigger(&mut self, now: f32, config: &DashConfig, ctx: &mut AbilityContext<'_>) {
        if self.active == 0 {
            self.gravity_before = ctx.body.gravity_enabled();
        }
        self.active += 1;
        self.charges -= 1;
        self.can_dash = false;

        ctx.flags.set_dashing(true);
        if !config.use_gravity {
            ctx.flags.set_gravity_suppressed(true);
            ctx.body.set_gravity_enabled(false);
        }
        if config.change_fov {
            ctx.fov.ease_field_of_view(config.duration * 0.5, config.dash_fov);
        }

        let impulse = if config.omnidirectional {
            if ctx.input.is_moving() {
                if !ctx.grounded {
                    ctx.body.clear_vertical_velocity();
                }
                ctx.heading.planar(ctx.input.move_axis) * config.force * 10.0
            } else {
                ctx.body.clear_vertical_velocity();
                Vec3::Y * config.force * 5.0
            }
        } else {
            ctx.heading.look() * config.force * 10.0
        };
        ctx.body.add_force(impulse, ForceMode::Impulse);

        self.events.schedule(now, config.duration, DashEvent::End);
        self.events.schedule(now, config.recharge_time, DashEvent::Recharge);
        self.events.schedule(now, config.cooldown, DashEvent::Enable);

        debug!(charges = self.charges, ?impulse, "dash");
    }

    fn handle(&mut self, event: DashEvent, config: &DashConfig, ctx: &mut AbilityContext<'_>) {
        match event {
            DashEvent::End => {
                self.active = self.active.saturating_sub(1);
                if self.active > 0 {
                    return;
                }
                ctx.flags.set_dashing(false);
                ctx.flags.set_gravity_suppressed(false);
                ctx.body.set_gravity_enabled(self.gravity_before);
                if config.change_fov {
                    ctx.fov.ease_field_of_view(config.duration, config.normal_fov);
                }
            }
            DashEvent::Recharge => {
                self.charges = (self.charges + 1).min(config.max_dash_amount);
            }
            DashEvent::Enable => self.can_dash = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::test_support::Rig;
    use crate::body::PhysicsBody;

    fn press(rig: &mut Rig, pressed: bool) {
        rig.input.dash_pressed = pressed;
    }

    // ==================== Trigger Tests ====================

    #[test]
    fn starts_full_and_ready() {
        let config = DashConfig {
            max_dash_amount: 3,
            ..default()
        };
        let dash = DashAbility::new(&config);
        assert_eq!(dash.charges(), 3);
        assert!(dash.can_dash());
    }

    #[test]
    fn no_charges_is_a_silent_no_op() {
        let config = DashConfig {
            max_dash_amount: 0,
            ..default()
        };
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        press(&mut rig, true);

        assert!(!dash.update(0.0, &config, &mut rig.ctx()));
        assert!(!rig.flags.dashing());
        assert_eq!(rig.body.velocity, Vec3::ZERO);
        assert_eq!(dash.pending_events(), 0);
    }

    #[test]
    fn dash_timeline() {
        let config = DashConfig::default();
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        press(&mut rig, true);

        assert!(dash.update(0.0, &config, &mut rig.ctx()));
        assert_eq!(dash.charges(), 0);
        assert!(!dash.can_dash());
        assert!(rig.flags.dashing());
        press(&mut rig, false);

        dash.update(0.29, &config, &mut rig.ctx());
        assert!(!dash.can_dash());
        dash.update(config.cooldown, &config, &mut rig.ctx());
        assert!(dash.can_dash());
        assert!(rig.flags.dashing());

        dash.update(config.duration, &config, &mut rig.ctx());
        assert!(!rig.flags.dashing());
        assert_eq!(dash.charges(), 0);

        dash.update(2.49, &config, &mut rig.ctx());
        assert_eq!(dash.charges(), 0);
        dash.update(config.recharge_time, &config, &mut rig.ctx());
        assert_eq!(dash.charges(), 1);
        assert_eq!(dash.pending_events(), 0);
    }

    #[test]
    fn held_button_during_cooldown_does_nothing() {
        let config = DashConfig {
            max_dash_amount: 2,
            ..default()
        };
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        press(&mut rig, true);

        assert!(dash.update(0.0, &config, &mut rig.ctx()));
        assert!(!dash.update(0.1, &config, &mut rig.ctx()));
        assert_eq!(dash.charges(), 1);
        assert!(dash.update(0.3, &config, &mut rig.ctx()));
        assert_eq!(dash.charges(), 0);
    }

    #[test]
    fn charges_stay_in_range() {
        let config = DashConfig {
            max_dash_amount: 2,
            cooldown: 0.1,
            recharge_time: 0.5,
            ..default()
        };
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();

        for step in 0..400 {
            press(&mut rig, step % 3 == 0);
            dash.update(step as f32 * 0.05, &config, &mut rig.ctx());
            assert!(dash.charges() <= config.max_dash_amount);
        }
        press(&mut rig, false);
        dash.update(1000.0, &config, &mut rig.ctx());
        assert_eq!(dash.charges(), 2);
    }

    #[test]
    fn refill_restores_pool_and_cooldown() {
        let config = DashConfig {
            max_dash_amount: 2,
            ..default()
        };
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        press(&mut rig, true);

        dash.update(0.0, &config, &mut rig.ctx());
        dash.refill(&config);
        assert_eq!(dash.charges(), 2);
        assert!(dash.can_dash());
        assert_eq!(dash.pending_events(), 1);
    }

    #[test]
    fn refill_mid_dash_still_ends_the_dash() {
        let config = DashConfig::default();
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        press(&mut rig, true);

        dash.update(0.0, &config, &mut rig.ctx());
        dash.refill(&config);
        press(&mut rig, false);

        dash.update(config.duration, &config, &mut rig.ctx());
        println!(
            "PROOF: dashing={} gravity_suppressed={}",
            rig.flags.dashing(),
            rig.flags.gravity_suppressed()
        );
        assert!(!rig.flags.dashing());
        assert!(!rig.flags.gravity_suppressed());
        assert!(rig.body.gravity_enabled());
        assert_eq!(dash.active(), 0);

        // Refilled charges stay put: the dropped recharge never fires.
        dash.update(100.0, &config, &mut rig.ctx());
        assert_eq!(dash.charges(), config.max_dash_amount);
    }

    // ==================== Gravity Tests ====================

    #[test]
    fn gravity_round_trips() {
        let config = DashConfig::default();
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        press(&mut rig, true);

        dash.update(0.0, &config, &mut rig.ctx());
        assert!(!rig.body.gravity_enabled());
        assert!(rig.flags.gravity_suppressed());

        press(&mut rig, false);
        dash.update(config.duration, &config, &mut rig.ctx());
        assert!(rig.body.gravity_enabled());
        assert!(!rig.flags.gravity_suppressed());
        assert!(!rig.flags.dashing());
    }

    #[test]
    fn gravity_restored_to_pre_dash_value() {
        let config = DashConfig::default();
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        rig.body.set_gravity_enabled(false);
        press(&mut rig, true);

        dash.update(0.0, &config, &mut rig.ctx());
        press(&mut rig, false);
        dash.update(1.0, &config, &mut rig.ctx());
        assert!(!rig.body.gravity_enabled());
    }

    #[test]
    fn overlapping_dashes_end_together() {
        // Cooldown shorter than duration lets a second dash start early.
        let config = DashConfig {
            max_dash_amount: 2,
            cooldown: 0.1,
            duration: 0.35,
            ..default()
        };
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        press(&mut rig, true);

        dash.update(0.0, &config, &mut rig.ctx());
        dash.update(0.1, &config, &mut rig.ctx());
        assert_eq!(dash.active(), 2);
        press(&mut rig, false);

        dash.update(0.35, &config, &mut rig.ctx());
        assert!(rig.flags.dashing());
        assert!(!rig.body.gravity_enabled());

        dash.update(0.5, &config, &mut rig.ctx());
        assert!(!rig.flags.dashing());
        assert!(rig.body.gravity_enabled());
    }

    #[test]
    fn use_gravity_leaves_gravity_alone() {
        let config = DashConfig {
            use_gravity: true,
            ..default()
        };
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        press(&mut rig, true);

        dash.update(0.0, &config, &mut rig.ctx());
        assert!(rig.body.gravity_enabled());
        assert!(!rig.flags.gravity_suppressed());
    }

    // ==================== Impulse Tests ====================

    #[test]
    fn camera_dash_follows_look_direction() {
        let config = DashConfig::default();
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        press(&mut rig, true);

        dash.update(0.0, &config, &mut rig.ctx());
        assert!((rig.body.velocity - Vec3::NEG_Z * 30.0).length() < 1e-4);
    }

    #[test]
    fn omni_dash_without_input_goes_up() {
        let config = DashConfig {
            omnidirectional: true,
            ..default()
        };
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        rig.body.velocity = Vec3::new(2.0, -8.0, 0.0);
        press(&mut rig, true);

        dash.update(0.0, &config, &mut rig.ctx());
        assert!((rig.body.velocity - Vec3::new(2.0, 15.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn omni_dash_in_air_drops_vertical_velocity() {
        let config = DashConfig {
            omnidirectional: true,
            ..default()
        };
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        rig.grounded = false;
        rig.body.velocity = Vec3::new(0.0, -8.0, 0.0);
        rig.input.set_move_axis(Vec2::X);
        press(&mut rig, true);

        dash.update(0.0, &config, &mut rig.ctx());
        assert!((rig.body.velocity - Vec3::X * 30.0).length() < 1e-4);
    }

    #[test]
    fn omni_dash_on_ground_keeps_vertical_velocity() {
        let config = DashConfig {
            omnidirectional: true,
            ..default()
        };
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        rig.body.velocity = Vec3::new(0.0, 1.0, 0.0);
        rig.input.set_move_axis(Vec2::Y);
        press(&mut rig, true);

        dash.update(0.0, &config, &mut rig.ctx());
        assert!((rig.body.velocity - Vec3::new(0.0, 1.0, -30.0)).length() < 1e-4);
    }

    // ==================== Field Of View Tests ====================

    #[test]
    fn fov_eases_out_and_back() {
        let config = DashConfig::default();
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        press(&mut rig, true);

        dash.update(0.0, &config, &mut rig.ctx());
        press(&mut rig, false);
        dash.update(1.0, &config, &mut rig.ctx());
        assert_eq!(rig.fov, vec![(0.175, 95.0), (0.35, 60.0)]);
    }

    #[test]
    fn fov_untouched_when_disabled() {
        let config = DashConfig {
            change_fov: false,
            ..default()
        };
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        press(&mut rig, true);

        dash.update(0.0, &config, &mut rig.ctx());
        dash.update(1.0, &config, &mut rig.ctx());
        assert!(rig.fov.is_empty());
    }

    #[test]
    fn refill_restores_full_pool() {
        let config = DashConfig::default();
        let mut dash = DashAbility::new(&config);
        let mut rig = Rig::new();
        press(&mut rig, true);
        dash.update(0.0, &config, &mut rig.ctx());

        let bigger = DashConfig {
            max_dash_amount: 4,
            ..default()
        };
        dash.refill(&bigger);
        assert_eq!(dash.charges(), 4);
        assert!(dash.can_dash());
        assert_eq!(dash.pending_events(), 0);
    }
}
