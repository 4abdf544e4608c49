//! Dash, jump and slide.
//!
//! Each ability is an independent component. Abilities never pick the
//! movement state themselves: they flip their own flag in
//! [`LocomotionFlags`] and push the body around, and the state machine reads
//! the flags on the next resolution.

mod dash;
mod jump;
mod slide;

pub use dash::{DashAbility, DashEvent};
pub use jump::{JumpAbility, JumpEvent};
pub use slide::SlideAbility;

use crate::body::PhysicsBody;
use crate::fov::FieldOfViewEffect;
use crate::intent::{Heading, MovementInput};
use crate::state::LocomotionFlags;

/// What an ability may read and write during one tick.
pub struct AbilityContext<'a> {
    pub input: &'a MovementInput,
    pub heading: &'a Heading,
    /// Ground contact from this tick's sensing.
    pub grounded: bool,
    pub flags: &'a mut LocomotionFlags,
    pub body: &'a mut dyn PhysicsBody,
    pub fov: &'a mut dyn FieldOfViewEffect,
}
