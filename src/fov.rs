//! Cosmetic field-of-view easing.
//!
//! The dash asks for a field-of-view change through [`FieldOfViewEffect`] and
//! never looks at the result. Inside Bevy the request becomes a
//! [`FieldOfViewEased`] message which cameras carrying [`FovEasing`] follow.

use bevy::prelude::*;

/// Fire-and-forget receiver of field-of-view requests.
pub trait FieldOfViewEffect {
    /// Ease the field of view to `target` degrees over `duration` seconds.
    fn ease_field_of_view(&mut self, duration: f32, target: f32);
}

/// Discards every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFieldOfView;

impl FieldOfViewEffect for NoFieldOfView {
    fn ease_field_of_view(&mut self, _duration: f32, _target: f32) {}
}

/// Records requests in order, for later delivery.
impl FieldOfViewEffect for Vec<(f32, f32)> {
    fn ease_field_of_view(&mut self, duration: f32, target: f32) {
        self.push((duration, target));
    }
}

/// Message written when a character requests a field-of-view change.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct FieldOfViewEased {
    /// Character that asked for the change.
    pub character: Entity,
    /// Seconds the change should take.
    pub duration: f32,
    /// Target field of view in degrees.
    pub target: f32,
}

/// Resumable linear blend of a field-of-view value.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct FovTween {
    start: f32,
    target: f32,
    duration: f32,
    elapsed: f32,
}

impl FovTween {
    pub fn new(start: f32, target: f32, duration: f32) -> Self {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        Self {
            start,
            target,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` seconds and return the value for this frame.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        if self.is_finished() {
            self.target
        } else {
            self.start + (self.target - self.start) * (self.elapsed / self.duration)
        }
    }
}

/// Camera-side state following [`FieldOfViewEased`] requests.
///
/// A new request replaces the running tween, starting from the current value.
#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
pub struct FovEasing {
    /// Current field of view in degrees.
    pub current: f32,
    /// Only follow requests from this character. `None` follows everyone.
    pub follows: Option<Entity>,
    tween: Option<FovTween>,
}

impl FovEasing {
    pub fn new(current: f32) -> Self {
        Self {
            current,
            follows: None,
            tween: None,
        }
    }

    pub fn following(mut self, character: Entity) -> Self {
        self.follows = Some(character);
        self
    }

    pub fn tween(&self) -> Option<&FovTween> {
        self.tween.as_ref()
    }

    /// Whether this camera reacts to requests from `character`.
    pub fn accepts(&self, character: Entity) -> bool {
        self.follows.is_none_or(|followed| followed == character)
    }

    /// Start easing toward `target` over `duration` seconds.
    pub fn request(&mut self, duration: f32, target: f32) {
        self.tween = Some(FovTween::new(self.current, target, duration));
    }

    /// Advance the running tween and return the new value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if let Some(tween) = self.tween.as_mut() {
            self.current = tween.advance(dt);
            if tween.is_finished() {
                self.tween = None;
            }
        }
        self.current
    }
}

impl Default for FovEasing {
    fn default() -> Self {
        Self::new(60.0)
    }
}
