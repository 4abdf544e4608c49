//! Avian3D physics backend implementation.
//!
//! This module provides the physics backend for Avian3D.
//! Enable with the `avian3d` feature.

use avian3d::prelude::*;
use bevy::app::RunFixedMainLoop;
use bevy::prelude::*;

use crate::backend::LocomotionBackend;
use crate::character::Character;
use crate::config::LocomotionConfig;
use crate::detection::{GroundProbe, SensorCast};
use crate::LocomotionSet;

/// Avian3D physics backend for the locomotion controller.
///
/// Velocity, damping and gravity map onto `LinearVelocity`, `LinearDamping`
/// and `GravityScale`. Ground sensing uses `SpatialQuery` ray casts from a
/// dedicated system.
pub struct Avian3dBackend;

impl LocomotionBackend for Avian3dBackend {
    fn plugin() -> impl Plugin {
        Avian3dBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<LinearVelocity>(entity)
            .map(|v| v.0)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3) {
        if let Some(mut vel) = world.get_mut::<LinearVelocity>(entity) {
            vel.0 = velocity;
        }
    }

    fn apply_impulse(world: &mut World, entity: Entity, impulse: Vec3) {
        // Impulse = mass * delta_v
        let mass = Self::get_mass(world, entity);
        if mass <= 0.0 {
            return;
        }
        if let Some(mut vel) = world.get_mut::<LinearVelocity>(entity) {
            vel.0 += impulse / mass;
        }
    }

    fn apply_force(world: &mut World, entity: Entity, force: Vec3) {
        let mass = Self::get_mass(world, entity);
        if mass <= 0.0 {
            return;
        }
        let dt = Self::get_fixed_timestep(world);
        if let Some(mut vel) = world.get_mut::<LinearVelocity>(entity) {
            vel.0 += force / mass * dt;
        }
    }

    fn gravity_enabled(world: &World, entity: Entity) -> bool {
        world
            .get::<GravityScale>(entity)
            .is_none_or(|scale| scale.0 != 0.0)
    }

    fn set_gravity_enabled(world: &mut World, entity: Entity, enabled: bool) {
        let scale = if enabled { 1.0 } else { 0.0 };
        if let Some(mut gravity) = world.get_mut::<GravityScale>(entity) {
            if gravity.0 != scale {
                gravity.0 = scale;
            }
        } else if let Ok(mut entity) = world.get_entity_mut(entity) {
            entity.insert(GravityScale(scale));
        }
    }

    fn get_linear_damping(world: &World, entity: Entity) -> f32 {
        world
            .get::<LinearDamping>(entity)
            .map(|d| d.0)
            .unwrap_or(0.0)
    }

    fn set_linear_damping(world: &mut World, entity: Entity, damping: f32) {
        if let Some(mut current) = world.get_mut::<LinearDamping>(entity) {
            if current.0 != damping {
                current.0 = damping;
            }
        } else if let Ok(mut entity) = world.get_entity_mut(entity) {
            entity.insert(LinearDamping(damping));
        }
    }

    fn get_mass(world: &World, entity: Entity) -> f32 {
        let Some(computed_mass) = world.get::<ComputedMass>(entity) else {
            return 0.0;
        };
        let mass = computed_mass.value();
        if mass <= 0.0 || !mass.is_finite() {
            return 0.0;
        }
        mass
    }

    fn get_position(world: &World, entity: Entity) -> Vec3 {
        // Try Avian's Position component first, then fall back to Transform
        world
            .get::<Position>(entity)
            .map(|p| p.0)
            .or_else(|| world.get::<Transform>(entity).map(|t| t.translation))
            .or_else(|| {
                world
                    .get::<GlobalTransform>(entity)
                    .map(|t| t.translation())
            })
            .unwrap_or(Vec3::ZERO)
    }
}

/// Plugin that sets up Avian3D-specific systems for the locomotion controller.
pub struct Avian3dBackendPlugin;

impl Plugin for Avian3dBackendPlugin {
    fn build(&self, app: &mut App) {
        app.register_required_components::<Character, RigidBody>();
        app.register_required_components::<Character, LinearVelocity>();
        app.register_required_components::<Character, LinearDamping>();
        app.register_required_components::<Character, GravityScale>();
        app.register_required_components_with::<Character, LockedAxes>(|| {
            LockedAxes::ROTATION_LOCKED
        });

        app.add_systems(
            RunFixedMainLoop,
            avian_ground_detection.in_set(LocomotionSet::Sensors),
        );
    }
}

/// Ray cast probe over Avian's spatial query that ignores the caster.
struct AvianGroundProbe<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    exclude: Entity,
}

impl GroundProbe for AvianGroundProbe<'_, '_, '_> {
    fn cast_down(&self, origin: Vec3, max_distance: f32, layers: u32) -> Option<SensorCast> {
        let filter = SpatialQueryFilter::from_mask(layers).with_excluded_entities([self.exclude]);
        self.spatial_query
            .cast_ray(origin, Dir3::NEG_Y, max_distance, true, &filter)
            .map(|hit| {
                let point = origin + Vec3::NEG_Y * hit.distance;
                SensorCast::hit(hit.distance, hit.normal, point, Some(hit.entity))
            })
    }
}

/// Avian-specific ground detection system using a downward ray cast.
///
/// The ray starts at the body center and reaches half the player height
/// plus the sensor margin.
fn avian_ground_detection(
    spatial_query: SpatialQuery,
    mut q_characters: Query<(Entity, &GlobalTransform, &LocomotionConfig, &mut Character)>,
) {
    for (entity, transform, config, mut character) in &mut q_characters {
        let probe = AvianGroundProbe {
            spatial_query: &spatial_query,
            exclude: entity,
        };
        character.sense(&probe, transform.translation(), &config.sensor);
    }
}
