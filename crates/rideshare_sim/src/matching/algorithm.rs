use bevy_ecs::prelude::Entity;

use crate::spatial::Location;

use super::types::DriverCandidate;

/// Chooses which idle driver serves a rider.
///
/// `idle_drivers` arrives in registration order (oldest registration first) and
/// contains only drivers that are registered with the dispatcher and idle, so
/// any returned entity is guaranteed to be free.
///
/// # Examples
///
/// ```rust
/// use bevy_ecs::prelude::Entity;
/// use rideshare_sim::matching::{DriverCandidate, MatchingAlgorithm, NearestIdleMatching};
/// use rideshare_sim::spatial::Location;
///
/// let near = DriverCandidate { entity: Entity::from_raw(2), location: Location::new(1, 1), speed: 1 };
/// let far = DriverCandidate { entity: Entity::from_raw(1), location: Location::new(9, 9), speed: 1 };
/// let chosen = NearestIdleMatching.find_match(Location::new(0, 0), &[far, near]);
/// assert_eq!(chosen, Some(Entity::from_raw(2)));
/// ```
pub trait MatchingAlgorithm: Send + Sync {
    fn find_match(&self, rider_origin: Location, idle_drivers: &[DriverCandidate]) -> Option<Entity>;

    /// Short label used in logs.
    fn name(&self) -> &'static str;
}
