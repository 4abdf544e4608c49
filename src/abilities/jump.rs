//! Ground-refilled multi-jump.

use bevy::prelude::*;

use super::AbilityContext;
use crate::body::ForceMode;
use crate::config::JumpConfig;
use crate::timers::ScheduledEvents;

/// Deferred jump bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpEvent {
    /// The cooldown after a jump is over.
    Ready,
}

/// Multi-jump with a cooldown.
///
/// The jump counter empties whenever the character stands on the ground
/// with the cooldown elapsed. From the ground a jump is always allowed; in
/// the air only while fewer than `max_jumps` jumps were made.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct JumpAbility {
    jumps: u32,
    ready: bool,
    events: ScheduledEvents<JumpEvent>,
}

impl Default for JumpAbility {
    fn default() -> Self {
        Self {
            jumps: 0,
            ready: true,
            events: ScheduledEvents::new(),
        }
    }
}

impl JumpAbility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jumps made since the counter was last reset.
    pub fn jumps(&self) -> u32 {
        self.jumps
    }

    pub fn ready(&self) -> bool {
        self.ready
    }

    /// Run one tick at time `now`. Returns whether a jump happened.
    pub fn update(&mut self, now: f32, config: &JumpConfig, ctx: &mut AbilityContext<'_>) -> bool {
        for event in self.events.drain_due(now) {
            match event {
                JumpEvent::Ready => self.ready = true,
            }
        }

        if ctx.grounded && self.ready {
            self.jumps = 0;
        }

        let has_charge = ctx.grounded || self.jumps < config.max_jumps;
        if !(ctx.input.jump_pressed && has_charge && self.ready) {
            return false;
        }

        ctx.body.clear_vertical_velocity();
        ctx.body.add_force(Vec3::Y * config.impulse, ForceMode::Impulse);
        self.ready = false;
        self.events.schedule(now, config.cooldown, JumpEvent::Ready);
        self.jumps += 1;

        debug!(jumps = self.jumps, grounded = ctx.grounded, "jump");
        true
    }
}
