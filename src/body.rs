//! Physics body abstraction used by the locomotion core.
//!
//! The core never talks to a physics engine directly. It reads and writes a
//! [`PhysicsBody`], which is implemented for engine entities by
//! [`BackendBody`](crate::backend::BackendBody) and headlessly by
//! [`MemoryBody`].

use bevy::prelude::*;

/// How a vector passed to [`PhysicsBody::add_force`] is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous force, integrated over one physics step.
    Force,
    /// Instantaneous change in momentum.
    Impulse,
}

/// The rigidbody a character is driven through.
pub trait PhysicsBody {
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    fn add_force(&mut self, force: Vec3, mode: ForceMode);
    fn gravity_enabled(&self) -> bool;
    fn set_gravity_enabled(&mut self, enabled: bool);
    fn linear_damping(&self) -> f32;
    fn set_linear_damping(&mut self, damping: f32);
    /// Vertical scale of the collision shape.
    fn vertical_scale(&self) -> f32;
    fn set_vertical_scale(&mut self, scale: f32);

    /// Velocity on the XZ plane.
    fn horizontal_velocity(&self) -> Vec3 {
        let v = self.velocity();
        Vec3::new(v.x, 0.0, v.z)
    }

    /// Speed on the XZ plane.
    fn horizontal_speed(&self) -> f32 {
        self.horizontal_velocity().length()
    }

    /// Zero the vertical velocity, keeping horizontal motion.
    fn clear_vertical_velocity(&mut self) {
        let v = self.velocity();
        self.set_velocity(Vec3::new(v.x, 0.0, v.z));
    }
}

/// A self-integrating body with no collision response.
///
/// Forces accumulate until [`MemoryBody::integrate`]; impulses change
/// velocity immediately. Damping uses `v *= 1 / (1 + damping * dt)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
    pub gravity: Vec3,
    pub gravity_enabled: bool,
    pub linear_damping: f32,
    pub vertical_scale: f32,
    accumulated_force: Vec3,
}

impl Default for MemoryBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            mass: 1.0,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            gravity_enabled: true,
            linear_damping: 0.0,
            vertical_scale: 1.0,
            accumulated_force: Vec3::ZERO,
        }
    }
}

impl MemoryBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..default()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Force accumulated since the last integration.
    pub fn pending_force(&self) -> Vec3 {
        self.accumulated_force
    }

    /// Advance one physics step of `dt` seconds.
    pub fn integrate(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        if self.mass > 0.0 {
            self.velocity += self.accumulated_force / self.mass * dt;
        }
        self.accumulated_force = Vec3::ZERO;
        if self.gravity_enabled {
            self.velocity += self.gravity * dt;
        }
        if self.linear_damping > 0.0 {
            self.velocity *= 1.0 / (1.0 + self.linear_damping * dt);
        }
        self.position += self.velocity * dt;
    }

    /// Keep the body's feet on a horizontal floor at `floor_y`.
    pub fn rest_on_floor(&mut self, floor_y: f32, half_height: f32) {
        let min_y = floor_y + half_height;
        if self.position.y < min_y {
            self.position.y = min_y;
            if self.velocity.y < 0.0 {
                self.velocity.y = 0.0;
            }
        }
    }
}

impl PhysicsBody for MemoryBody {
    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Force => self.accumulated_force += force,
            ForceMode::Impulse => {
                if self.mass > 0.0 {
                    self.velocity += force / self.mass;
                }
            }
        }
    }

    fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    fn linear_damping(&self) -> f32 {
        self.linear_damping
    }

    fn set_linear_damping(&mut self, damping: f32) {
        self.linear_damping = damping;
    }

    fn vertical_scale(&self) -> f32 {
        self.vertical_scale
    }

    fn set_vertical_scale(&mut self, scale: f32) {
        self.vertical_scale = scale;
    }
}
