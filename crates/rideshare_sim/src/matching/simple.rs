use bevy_ecs::prelude::Entity;

use crate::spatial::Location;

use super::algorithm::MatchingAlgorithm;
use super::types::DriverCandidate;

/// Baseline policy: the longest-registered idle driver, wherever it is.
///
/// Ignores distance entirely; useful for comparisons and for deterministic,
/// easy-to-follow test scenarios.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstIdleMatching;

impl MatchingAlgorithm for FirstIdleMatching {
    fn find_match(&self, _rider_origin: Location, idle_drivers: &[DriverCandidate]) -> Option<Entity> {
        idle_drivers.first().map(|candidate| candidate.entity)
    }

    fn name(&self) -> &'static str {
        "first-idle"
    }
}
