use bevy::prelude::*;

/// Empty plugin for backends that don't need additional setup.
///
/// A backend using it must sense the ground some other way, or its
/// characters are never grounded.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}
