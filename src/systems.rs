//! Bevy systems driving [`Character`] through a backend.
//!
//! Systems that touch the physics body are exclusive: they copy the
//! character's components and the `Copy` parts of its config out, run the
//! pure pipeline against a [`BackendBody`], and write the results back.

use bevy::prelude::*;

use crate::abilities::{DashAbility, JumpAbility, SlideAbility};
use crate::backend::{BackendBody, LocomotionBackend};
use crate::character::{run_abilities, Character};
use crate::config::LocomotionConfig;
use crate::fov::{FieldOfViewEased, FovEasing};
use crate::intent::{Heading, MovementInput};

/// Fill the dash charges of newly spawned characters from their config.
pub fn prime_dash_charges(
    mut q_characters: Query<(&LocomotionConfig, &mut DashAbility), Added<DashAbility>>,
) {
    for (config, mut dash) in &mut q_characters {
        dash.refill(&config.dash);
    }
}

fn characters(world: &mut World) -> Vec<Entity> {
    let mut query = world.query_filtered::<Entity, With<Character>>();
    query.iter(world).collect()
}

/// Run dash, jump and slide for every character.
pub fn update_abilities<B: LocomotionBackend>(world: &mut World) {
    let now = world.resource::<Time>().elapsed_secs();

    for entity in characters(world) {
        let Ok(entity_ref) = world.get_entity(entity) else {
            continue;
        };
        let (
            Some(mut character),
            Some(tuning),
            Some(input),
            Some(heading),
            Some(mut dash),
            Some(mut jump),
            Some(mut slide),
        ) = (
            entity_ref.get::<Character>().cloned(),
            entity_ref.get::<LocomotionConfig>().map(LocomotionConfig::abilities),
            entity_ref.get::<MovementInput>().copied(),
            entity_ref.get::<Heading>().copied(),
            entity_ref.get::<DashAbility>().cloned(),
            entity_ref.get::<JumpAbility>().cloned(),
            entity_ref.get::<SlideAbility>().cloned(),
        )
        else {
            continue;
        };

        let mut fov_requests: Vec<(f32, f32)> = Vec::new();
        {
            let mut body = BackendBody::<B>::new(world, entity);
            character.apply_posture_input(&input);
            let mut ctx = character.ability_context(&input, &heading, &mut body, &mut fov_requests);
            run_abilities(now, &tuning, &mut ctx, &mut dash, &mut jump, &mut slide);
        }

        if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
            if let Some(mut c) = entity_mut.get_mut::<Character>() {
                c.flags = character.flags;
            }
            if let Some(mut d) = entity_mut.get_mut::<DashAbility>() {
                *d = dash;
            }
            if let Some(mut j) = entity_mut.get_mut::<JumpAbility>() {
                *j = jump;
            }
            if let Some(mut s) = entity_mut.get_mut::<SlideAbility>() {
                *s = slide;
            }
        }

        for (duration, target) in fov_requests {
            world.write_message(FieldOfViewEased {
                character: entity,
                duration,
                target,
            });
        }
    }
}

/// Resolve the movement state and track the speed limit.
pub fn resolve_locomotion(
    time: Res<Time>,
    mut q_characters: Query<(&mut Character, &LocomotionConfig)>,
) {
    let dt = time.delta_secs();
    for (mut character, config) in &mut q_characters {
        let desired = character.resolve(&config.speed);
        character.update_speed(desired, dt, &config.speed);
    }
}

/// Apply drag, the velocity clamp and gravity to every body.
pub fn control_bodies<B: LocomotionBackend>(world: &mut World) {
    for entity in characters(world) {
        let Ok(entity_ref) = world.get_entity(entity) else {
            continue;
        };
        let (Some(character), Some(config)) = (
            entity_ref.get::<Character>().cloned(),
            entity_ref.get::<LocomotionConfig>(),
        ) else {
            continue;
        };
        let damping = character.linear_damping(&config.drag);

        let mut body = BackendBody::<B>::new(world, entity);
        character.control_body(damping, &mut body);
    }
}

/// Apply the movement force for one fixed step.
pub fn apply_movement<B: LocomotionBackend>(world: &mut World) {
    for entity in characters(world) {
        let Ok(entity_ref) = world.get_entity(entity) else {
            continue;
        };
        let (Some(character), Some((speeds, gains)), Some(input), Some(heading)) = (
            entity_ref.get::<Character>().cloned(),
            entity_ref
                .get::<LocomotionConfig>()
                .map(|config| (config.speed, config.force)),
            entity_ref.get::<MovementInput>().copied(),
            entity_ref.get::<Heading>().copied(),
        ) else {
            continue;
        };

        let mut body = BackendBody::<B>::new(world, entity);
        character.apply_movement(&input, &heading, &speeds, &gains, &mut body);
    }
}

/// Start tweens on cameras following the requesting character.
pub fn receive_fov_requests(
    mut messages: MessageReader<FieldOfViewEased>,
    mut q_cameras: Query<&mut FovEasing>,
) {
    for message in messages.read() {
        for mut easing in &mut q_cameras {
            if easing.accepts(message.character) {
                easing.request(message.duration, message.target);
            }
        }
    }
}

/// Advance running tweens and write the perspective projection.
pub fn ease_field_of_view(
    time: Res<Time>,
    mut q_cameras: Query<(&mut FovEasing, Option<&mut Projection>)>,
) {
    let dt = time.delta_secs();
    for (mut easing, projection) in &mut q_cameras {
        if easing.tween().is_none() {
            continue;
        }
        let fov = easing.advance(dt);
        if let Some(mut projection) = projection {
            if let Projection::Perspective(perspective) = projection.as_mut() {
                perspective.fov = fov.to_radians();
            }
        }
    }
}
