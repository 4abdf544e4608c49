//! # fp_locomotion
//!
//! A first-person locomotion controller for Bevy.
//!
//! The controller turns an input snapshot into physics forces. It tracks one
//! active [`MovementState`](state::MovementState) per character, picks drag
//! and gravity from the ground under the body, smooths speed limit drops, and
//! layers dash, multi-jump and slide abilities on top.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use fp_locomotion::prelude::*;
//!
//! # #[cfg(feature = "avian3d")]
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(avian3d::prelude::PhysicsPlugins::default())
//!         .add_plugins(LocomotionPlugin::<Avian3dBackend>::default())
//!         .add_systems(Startup, spawn_player)
//!         .run();
//! }
//! # #[cfg(not(feature = "avian3d"))]
//! # fn main() {}
//!
//! # #[cfg(feature = "avian3d")]
//! fn spawn_player(mut commands: Commands) {
//!     commands.spawn((
//!         Transform::from_xyz(0.0, 2.0, 0.0),
//!         Character::default(),
//!         avian3d::prelude::Collider::capsule(0.5, 1.0),
//!     ));
//! }
//! ```
//!
//! The input layer writes [`MovementInput`](intent::MovementInput) and the
//! camera-look layer writes [`Heading`](intent::Heading); everything else is
//! derived by the plugin's systems.

use std::marker::PhantomData;

use bevy::app::{FixedMain, RunFixedMainLoop};
use bevy::prelude::*;

pub mod abilities;
pub mod backend;
pub mod body;
pub mod character;
pub mod config;
pub mod detection;
pub mod error;
pub mod force;
pub mod fov;
pub mod intent;
pub mod slope;
pub mod speed;
pub mod state;
pub mod systems;
pub mod timers;

#[cfg(feature = "avian3d")]
pub mod avian;

use backend::LocomotionBackend;

pub mod prelude {
    pub use crate::abilities::{AbilityContext, DashAbility, JumpAbility, SlideAbility};
    pub use crate::backend::{BackendBody, LocomotionBackend, NoOpBackendPlugin};
    pub use crate::body::{ForceMode, MemoryBody, PhysicsBody};
    pub use crate::character::{run_abilities, Character};
    pub use crate::config::{
        AbilityTuning, CurveKey, DashConfig, DragProfile, ForceConfig, GroundSensorConfig,
        JumpConfig, LocomotionConfig, SlideConfig, SlideThreshold, SlopeDragCurve, SpeedProfile,
    };
    pub use crate::detection::{GroundPlane, GroundProbe, SensorCast};
    pub use crate::error::ConfigError;
    pub use crate::fov::{FieldOfViewEased, FieldOfViewEffect, FovEasing, NoFieldOfView};
    pub use crate::intent::{Heading, MovementInput};
    pub use crate::slope::SlopeClassification;
    pub use crate::speed::SpeedController;
    pub use crate::state::{DragState, LocomotionFlags, MovementState};
    pub use crate::{LocomotionPlugin, LocomotionSet};

    #[cfg(feature = "avian3d")]
    pub use crate::avian::Avian3dBackend;
}

/// System sets for locomotion systems.
///
/// The frame sets run chained in declaration order in [`RunFixedMainLoop`],
/// before the fixed main loop, so every fixed step sees the state resolved
/// this frame. `Movement` runs in `FixedUpdate`. Backend plugins add their
/// ground probe to `Sensors` in [`RunFixedMainLoop`] as well.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    /// Ground probing and slope classification.
    Sensors,
    /// Dash, jump and slide.
    Abilities,
    /// Movement state and speed limit.
    StateResolution,
    /// Drag, velocity clamp and gravity.
    BodyControl,
    /// Field-of-view easing.
    Cosmetics,
    /// Movement force, once per fixed step.
    Movement,
}

/// Main plugin for the locomotion controller.
///
/// Generic over the physics backend `B`, whose own plugin is added too.
pub struct LocomotionPlugin<B: LocomotionBackend> {
    _marker: PhantomData<B>,
}

impl<B: LocomotionBackend> Default for LocomotionPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<B: LocomotionBackend> Plugin for LocomotionPlugin<B> {
    fn build(&self, app: &mut App) {
        app.register_type::<character::Character>()
            .register_type::<config::LocomotionConfig>()
            .register_type::<intent::MovementInput>()
            .register_type::<intent::Heading>()
            .register_type::<abilities::SlideAbility>()
            .register_type::<fov::FovEasing>();

        app.add_message::<fov::FieldOfViewEased>();

        app.configure_sets(
            RunFixedMainLoop,
            (
                LocomotionSet::Sensors,
                LocomotionSet::Abilities,
                LocomotionSet::StateResolution,
                LocomotionSet::BodyControl,
                LocomotionSet::Cosmetics,
            )
                .chain()
                .before(FixedMain::run_fixed_main),
        );
        app.configure_sets(FixedUpdate, LocomotionSet::Movement);

        app.add_systems(
            RunFixedMainLoop,
            (
                systems::prime_dash_charges.in_set(LocomotionSet::Sensors),
                systems::update_abilities::<B>.in_set(LocomotionSet::Abilities),
                systems::resolve_locomotion.in_set(LocomotionSet::StateResolution),
                systems::control_bodies::<B>.in_set(LocomotionSet::BodyControl),
                (systems::receive_fov_requests, systems::ease_field_of_view)
                    .chain()
                    .in_set(LocomotionSet::Cosmetics),
            ),
        );
        app.add_systems(
            FixedUpdate,
            systems::apply_movement::<B>.in_set(LocomotionSet::Movement),
        );

        app.add_plugins(B::plugin());
    }
}
