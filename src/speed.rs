//! Speed limit tracking and smoothing.
//!
//! The active speed limit follows the state machine's desired speed. Rises
//! apply at once; large drops are eased linearly over as many seconds as the
//! speed difference, so going from a slide to a walk does not stop the body
//! dead.

use bevy::prelude::*;

/// Resumable linear blend from one speed to another.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct SpeedSmoothing {
    start: f32,
    target: f32,
    duration: f32,
    elapsed: f32,
}

impl SpeedSmoothing {
    /// Blend from `start` to `target` over `|target - start|` seconds.
    pub fn new(start: f32, target: f32) -> Self {
        Self {
            start,
            target,
            duration: (target - start).abs(),
            elapsed: 0.0,
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Value at the current point of the blend.
    pub fn sample(&self) -> f32 {
        if self.is_finished() {
            self.target
        } else {
            self.start + (self.target - self.start) * (self.elapsed / self.duration)
        }
    }

    /// Move the blend forward by `dt` seconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.sample()
    }
}

/// Owns the current speed limit and the desired speed it tracks.
#[derive(Reflect, Debug, Clone, Default, PartialEq)]
pub struct SpeedController {
    current: f32,
    desired: f32,
    last_desired: f32,
    smoothing: Option<SpeedSmoothing>,
}

impl SpeedController {
    /// Controller starting at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller already running at `speed`.
    pub fn at(speed: f32) -> Self {
        Self {
            current: speed,
            desired: speed,
            last_desired: speed,
            smoothing: None,
        }
    }

    /// Active speed limit used by force application and clamping.
    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn desired(&self) -> f32 {
        self.desired
    }

    /// In-flight smoothing, if any.
    pub fn smoothing(&self) -> Option<&SpeedSmoothing> {
        self.smoothing.as_ref()
    }

    /// Track a new desired speed for this tick.
    ///
    /// A drop below the current speed by a target jump larger than
    /// `threshold` starts (or replaces) a smoothing blend. Any other change
    /// cancels the blend and snaps. An unchanged target lets a running blend
    /// advance by `dt`.
    pub fn update(&mut self, desired: f32, dt: f32, threshold: f32) {
        let previous = self.last_desired;
        self.desired = desired;
        self.last_desired = desired;

        if let Some(smoothing) = self.smoothing.as_mut() {
            if smoothing.target() == desired {
                self.current = smoothing.advance(dt);
                if smoothing.is_finished() {
                    self.smoothing = None;
                }
                return;
            }
            self.smoothing = None;
        }

        if desired < self.current && (desired - previous).abs() > threshold {
            let smoothing = SpeedSmoothing::new(self.current, desired);
            debug!(
                from = self.current,
                to = desired,
                seconds = smoothing.duration(),
                "easing speed limit down"
            );
            self.current = smoothing.sample();
            self.smoothing = Some(smoothing);
        } else {
            self.current = desired;
        }
    }
}
