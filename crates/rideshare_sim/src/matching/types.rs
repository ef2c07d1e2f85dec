use bevy_ecs::prelude::Entity;

use crate::spatial::Location;

/// An idle registered driver offered to a matching algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverCandidate {
    pub entity: Entity,
    pub location: Location,
    pub speed: u32,
}
