//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement to
//! drive a locomotion character. The controller never names an engine type;
//! it goes through these static accessors on the Bevy `World`.

use std::marker::PhantomData;

use bevy::prelude::*;

use crate::body::{ForceMode, PhysicsBody};

/// Trait for physics backend implementations.
///
/// Implement this trait to integrate a physics engine with the locomotion
/// controller. The backend's plugin is also responsible for ground sensing:
/// it must register a system in [`LocomotionSet::Sensors`](crate::LocomotionSet)
/// that feeds [`Character::set_ground`](crate::character::Character::set_ground).
pub trait LocomotionBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Get the current velocity of an entity.
    fn get_velocity(world: &World, entity: Entity) -> Vec3;

    /// Set the velocity of an entity.
    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3);

    /// Apply an impulse to an entity.
    ///
    /// Impulse is an instantaneous change in momentum.
    fn apply_impulse(world: &mut World, entity: Entity, impulse: Vec3);

    /// Apply a force to an entity over one fixed physics step.
    fn apply_force(world: &mut World, entity: Entity, force: Vec3);

    /// Whether gravity currently acts on the entity.
    fn gravity_enabled(world: &World, entity: Entity) -> bool;

    /// Switch gravity on or off for the entity.
    fn set_gravity_enabled(world: &mut World, entity: Entity, enabled: bool);

    /// Get the linear damping coefficient of an entity.
    fn get_linear_damping(world: &World, entity: Entity) -> f32;

    /// Set the linear damping coefficient of an entity.
    fn set_linear_damping(world: &mut World, entity: Entity, damping: f32);

    /// Get the mass of an entity. Zero when the mass is unknown.
    fn get_mass(world: &World, entity: Entity) -> f32;

    /// Get the current position of an entity.
    fn get_position(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<Transform>(entity)
            .map(|t| t.translation)
            .unwrap_or(Vec3::ZERO)
    }

    /// Vertical scale of the entity's collision shape.
    ///
    /// The default reads the `Transform` scale.
    fn get_vertical_scale(world: &World, entity: Entity) -> f32 {
        world
            .get::<Transform>(entity)
            .map(|t| t.scale.y)
            .unwrap_or(1.0)
    }

    /// Set the vertical scale of the entity's collision shape.
    fn set_vertical_scale(world: &mut World, entity: Entity, scale: f32) {
        if let Some(mut transform) = world.get_mut::<Transform>(entity) {
            transform.scale.y = scale;
        }
    }

    /// Get the fixed timestep delta time.
    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|t| t.delta_secs())
            .filter(|&d| d > 0.0)
            .unwrap_or(1.0 / 64.0)
    }
}

/// One entity of a backend, seen as a [`PhysicsBody`].
pub struct BackendBody<'w, B: LocomotionBackend> {
    world: &'w mut World,
    entity: Entity,
    _backend: PhantomData<B>,
}

impl<'w, B: LocomotionBackend> BackendBody<'w, B> {
    pub fn new(world: &'w mut World, entity: Entity) -> Self {
        Self {
            world,
            entity,
            _backend: PhantomData,
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }
}

impl<B: LocomotionBackend> PhysicsBody for BackendBody<'_, B> {
    fn velocity(&self) -> Vec3 {
        B::get_velocity(self.world, self.entity)
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        B::set_velocity(self.world, self.entity, velocity);
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Force => B::apply_force(self.world, self.entity, force),
            ForceMode::Impulse => B::apply_impulse(self.world, self.entity, force),
        }
    }

    fn gravity_enabled(&self) -> bool {
        B::gravity_enabled(self.world, self.entity)
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        B::set_gravity_enabled(self.world, self.entity, enabled);
    }

    fn linear_damping(&self) -> f32 {
        B::get_linear_damping(self.world, self.entity)
    }

    fn set_linear_damping(&mut self, damping: f32) {
        B::set_linear_damping(self.world, self.entity, damping);
    }

    fn vertical_scale(&self) -> f32 {
        B::get_vertical_scale(self.world, self.entity)
    }

    fn set_vertical_scale(&mut self, scale: f32) {
        B::set_vertical_scale(self.world, self.entity, scale);
    }
}
