use bevy_ecs::prelude::Entity;

use crate::spatial::{manhattan_distance, Location};

use super::algorithm::MatchingAlgorithm;
use super::types::DriverCandidate;

/// Picks the idle driver with the shortest travel time to the rider's origin.
///
/// Travel time is `distance / speed`, compared exactly by cross-multiplying
/// (`d1 * s2 < d2 * s1`) so fractional times never collapse through rounding.
/// Ties go to the earliest-registered driver.
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestIdleMatching;

impl MatchingAlgorithm for NearestIdleMatching {
    fn find_match(&self, rider_origin: Location, idle_drivers: &[DriverCandidate]) -> Option<Entity> {
        let mut best: Option<(&DriverCandidate, u128)> = None;
        for candidate in idle_drivers {
            let distance = u128::from(manhattan_distance(candidate.location, rider_origin));
            let faster = match best {
                None => true,
                Some((current, current_distance)) => {
                    distance * u128::from(current.speed) < current_distance * u128::from(candidate.speed)
                }
            };
            if faster {
                best = Some((candidate, distance));
            }
        }
        best.map(|(candidate, _)| candidate.entity)
    }

    fn name(&self) -> &'static str {
        "nearest-idle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(n: u32, row: i64, column: i64, speed: u32) -> DriverCandidate {
        DriverCandidate {
            entity: Entity::from_raw(n),
            location: Location::new(row, column),
            speed,
        }
    }

    #[test]
    fn prefers_shortest_travel_time_not_distance() {
        // 10 units at speed 5 (2 ticks) beats 3 units at speed 1 (3 ticks).
        let slow_close = candidate(1, 0, 3, 1);
        let fast_far = candidate(2, 5, 5, 5);
        let chosen = NearestIdleMatching.find_match(Location::new(0, 0), &[slow_close, fast_far]);
        assert_eq!(chosen, Some(Entity::from_raw(2)));
    }

    #[test]
    fn ties_go_to_earliest_registration() {
        let first = candidate(7, 0, 4, 2);
        let second = candidate(3, 2, 0, 1);
        let chosen = NearestIdleMatching.find_match(Location::new(0, 0), &[first, second]);
        assert_eq!(chosen, Some(Entity::from_raw(7)));
    }

    #[test]
    fn distinguishes_times_that_round_to_the_same_tick() {
        // 5/2 = 2.5 and 7/3 ≈ 2.33 both round to 2, but the second is faster.
        let a = candidate(1, 0, 5, 2);
        let b = candidate(2, 0, 7, 3);
        let chosen = NearestIdleMatching.find_match(Location::new(0, 0), &[a, b]);
        assert_eq!(chosen, Some(Entity::from_raw(2)));
    }

    #[test]
    fn no_candidates_no_match() {
        assert_eq!(NearestIdleMatching.find_match(Location::new(0, 0), &[]), None);
    }
}
