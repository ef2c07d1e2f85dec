//! Dispatcher: the FIFO waiting list of unmatched riders and the registry of
//! drivers that have ever asked for work.
//!
//! Rider and driver state lives on their entities; the dispatcher only owns the
//! two collections and decides pairings. Both keep an ordered sequence for
//! FIFO and registration order next to a set for constant-time membership;
//! cancelled riders are dropped from the set at once and skipped lazily when
//! they reach the front of the queue. Callers pass in the driver snapshot
//! ([DriverCandidate]s in registration order) so the dispatcher never reaches
//! into the world itself.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use bevy_ecs::prelude::{Entity, Resource, World};
use thiserror::Error;

use crate::ecs::Driver;
use crate::matching::{DriverCandidate, MatchingAlgorithm, MatchingAlgorithmType};
use crate::spatial::Location;

/// Stale queue entries tolerated before the queue is compacted.
const COMPACT_SLACK: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("rider {0:?} is not on the waiting list")]
    RiderNotWaiting(Entity),
}

#[derive(Resource)]
pub struct Dispatcher {
    /// May still hold cancelled riders; `waiting_set` is authoritative.
    waiting: VecDeque<Entity>,
    waiting_set: HashSet<Entity>,
    registered: Vec<Entity>,
    registered_set: HashSet<Entity>,
    matching: Box<dyn MatchingAlgorithm>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(MatchingAlgorithmType::default())
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("waiting", &self.waiting_riders().collect::<Vec<_>>())
            .field("registered", &self.registered)
            .field("matching", &self.matching.name())
            .finish()
    }
}

impl fmt::Display for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dispatcher: {} drivers registered, {} riders waiting",
            self.registered.len(),
            self.waiting_len()
        )
    }
}

impl Dispatcher {
    pub fn new(matching: MatchingAlgorithmType) -> Self {
        Self::with_algorithm(matching.build())
    }

    pub fn with_algorithm(matching: Box<dyn MatchingAlgorithm>) -> Self {
        Self {
            waiting: VecDeque::new(),
            waiting_set: HashSet::new(),
            registered: Vec::new(),
            registered_set: HashSet::new(),
            matching,
        }
    }

    /// Find a driver for `rider`, or put the rider at the back of the waiting list.
    ///
    /// `fleet` must list the registered drivers in registration order; busy ones
    /// (and any entry that never registered) are filtered out here so the
    /// matching policy only ever sees idle drivers. Returning a driver does not
    /// change its state: the caller starts the drive.
    pub fn request_driver(
        &mut self,
        rider: Entity,
        origin: Location,
        fleet: &[FleetEntry],
    ) -> Option<Entity> {
        let idle: Vec<DriverCandidate> = fleet
            .iter()
            .filter(|entry| entry.idle && self.registered_set.contains(&entry.candidate.entity))
            .map(|entry| entry.candidate)
            .collect();

        let chosen = self.matching.find_match(origin, &idle);
        if chosen.is_none() {
            let fresh = self.waiting_set.insert(rider);
            debug_assert!(fresh, "rider queued twice");
            if fresh {
                self.waiting.push_back(rider);
            }
        }
        chosen
    }

    /// Register `driver` on first contact, then hand it the longest-waiting rider.
    pub fn request_rider(&mut self, driver: Entity) -> Option<Entity> {
        if self.registered_set.insert(driver) {
            self.registered.push(driver);
        }
        while let Some(rider) = self.waiting.pop_front() {
            if self.waiting_set.remove(&rider) {
                return Some(rider);
            }
        }
        None
    }

    /// Remove a still-waiting rider from the queue.
    ///
    /// Only riders currently on the waiting list can be cancelled here; a rider
    /// that already has a driver on the way is not the dispatcher's concern.
    pub fn cancel_ride(&mut self, rider: Entity) -> Result<(), DispatchError> {
        if !self.waiting_set.remove(&rider) {
            return Err(DispatchError::RiderNotWaiting(rider));
        }
        if self.waiting.front() == Some(&rider) {
            self.waiting.pop_front();
        } else if self.waiting.len() > 2 * self.waiting_set.len() + COMPACT_SLACK {
            let live = &self.waiting_set;
            self.waiting.retain(|queued| live.contains(queued));
        }
        Ok(())
    }

    pub fn is_waiting(&self, rider: Entity) -> bool {
        self.waiting_set.contains(&rider)
    }

    pub fn is_registered(&self, driver: Entity) -> bool {
        self.registered_set.contains(&driver)
    }

    /// Waiting riders, longest-waiting first.
    pub fn waiting_riders(&self) -> impl Iterator<Item = Entity> + '_ {
        self.waiting
            .iter()
            .copied()
            .filter(|rider| self.waiting_set.contains(rider))
    }

    pub fn waiting_len(&self) -> usize {
        self.waiting_set.len()
    }

    pub fn registered_drivers(&self) -> &[Entity] {
        &self.registered
    }

    pub fn matching_name(&self) -> &'static str {
        self.matching.name()
    }
}

/// A registered driver as seen at matching time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleetEntry {
    pub candidate: DriverCandidate,
    pub idle: bool,
}

/// Snapshot of every registered driver, in registration order.
pub fn fleet_snapshot(world: &World) -> Vec<FleetEntry> {
    let dispatcher = world.resource::<Dispatcher>();
    dispatcher
        .registered_drivers()
        .iter()
        .filter_map(|&entity| {
            let driver = world.get::<Driver>(entity)?;
            Some(FleetEntry {
                candidate: DriverCandidate {
                    entity,
                    location: driver.location,
                    speed: driver.speed,
                },
                idle: driver.idle,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: u32, row: i64, idle: bool) -> FleetEntry {
        FleetEntry {
            candidate: DriverCandidate {
                entity: Entity::from_raw(n),
                location: Location::new(row, 0),
                speed: 1,
            },
            idle,
        }
    }

    #[test]
    fn rider_waits_when_no_driver_registered() {
        let mut dispatcher = Dispatcher::default();
        let rider = Entity::from_raw(1);
        assert_eq!(dispatcher.request_driver(rider, Location::new(0, 0), &[]), None);
        assert!(dispatcher.is_waiting(rider));
        assert_eq!(dispatcher.waiting_len(), 1);
    }

    #[test]
    fn busy_drivers_are_never_returned() {
        let mut dispatcher = Dispatcher::default();
        let busy = Entity::from_raw(10);
        let idle = Entity::from_raw(11);
        dispatcher.request_rider(busy);
        dispatcher.request_rider(idle);

        // The busy driver is closest but must be skipped.
        let fleet = [entry(10, 0, false), entry(11, 8, true)];
        let rider = Entity::from_raw(1);
        assert_eq!(
            dispatcher.request_driver(rider, Location::new(0, 0), &fleet),
            Some(idle)
        );
        assert!(!dispatcher.is_waiting(rider));

        let all_busy = [entry(10, 0, false), entry(11, 8, false)];
        let other = Entity::from_raw(2);
        assert_eq!(
            dispatcher.request_driver(other, Location::new(0, 0), &all_busy),
            None
        );
        assert!(dispatcher.is_waiting(other));
    }

    #[test]
    fn unregistered_fleet_entries_are_ignored() {
        let mut dispatcher = Dispatcher::default();
        let rider = Entity::from_raw(1);
        let fleet = [entry(10, 0, true)];
        assert_eq!(dispatcher.request_driver(rider, Location::new(0, 0), &fleet), None);
        assert!(dispatcher.is_waiting(rider));
    }

    #[test]
    fn request_rider_registers_once_and_pops_oldest() {
        let mut dispatcher = Dispatcher::default();
        let first = Entity::from_raw(1);
        let second = Entity::from_raw(2);
        dispatcher.request_driver(first, Location::new(0, 0), &[]);
        dispatcher.request_driver(second, Location::new(0, 0), &[]);

        let driver = Entity::from_raw(10);
        assert_eq!(dispatcher.request_rider(driver), Some(first));
        assert_eq!(dispatcher.request_rider(driver), Some(second));
        assert_eq!(dispatcher.request_rider(driver), None);
        assert_eq!(dispatcher.registered_drivers(), &[driver]);
    }

    #[test]
    fn cancel_ride_removes_waiting_rider_only_once() {
        let mut dispatcher = Dispatcher::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        dispatcher.request_driver(a, Location::new(0, 0), &[]);
        dispatcher.request_driver(b, Location::new(0, 0), &[]);

        assert_eq!(dispatcher.cancel_ride(a), Ok(()));
        assert_eq!(dispatcher.waiting_riders().collect::<Vec<_>>(), vec![b]);
        assert_eq!(dispatcher.cancel_ride(a), Err(DispatchError::RiderNotWaiting(a)));
    }

    #[test]
    fn cancelled_riders_are_skipped_when_reaching_the_front() {
        let mut dispatcher = Dispatcher::default();
        let riders: Vec<Entity> = (1..=4).map(Entity::from_raw).collect();
        for &rider in &riders {
            dispatcher.request_driver(rider, Location::new(0, 0), &[]);
        }
        assert_eq!(dispatcher.cancel_ride(riders[1]), Ok(()));
        assert_eq!(dispatcher.cancel_ride(riders[2]), Ok(()));
        assert_eq!(dispatcher.waiting_len(), 2);
        assert!(!dispatcher.is_waiting(riders[2]));

        let driver = Entity::from_raw(10);
        assert_eq!(dispatcher.request_rider(driver), Some(riders[0]));
        assert_eq!(dispatcher.request_rider(driver), Some(riders[3]));
        assert_eq!(dispatcher.request_rider(driver), None);
        assert_eq!(dispatcher.waiting_len(), 0);
    }

    #[test]
    fn mass_cancellation_compacts_the_queue_in_order() {
        let mut dispatcher = Dispatcher::default();
        let riders: Vec<Entity> = (1..=1_000).map(Entity::from_raw).collect();
        for &rider in &riders {
            dispatcher.request_driver(rider, Location::new(0, 0), &[]);
        }
        for &rider in riders.iter().skip(1).filter(|rider| rider.index() % 10 != 0) {
            assert_eq!(dispatcher.cancel_ride(rider), Ok(()));
        }

        let expected: Vec<Entity> = std::iter::once(riders[0])
            .chain(riders.iter().copied().filter(|rider| rider.index() % 10 == 0))
            .collect();
        assert_eq!(dispatcher.waiting_riders().collect::<Vec<_>>(), expected);
        assert_eq!(dispatcher.waiting_len(), expected.len());
    }

    #[test]
    fn large_fleet_registers_each_driver_once() {
        let mut dispatcher = Dispatcher::default();
        let fleet: Vec<FleetEntry> = (0..5_000).map(|n| entry(n, i64::from(n), true)).collect();
        for round in 0..2 {
            for item in &fleet {
                assert_eq!(dispatcher.request_rider(item.candidate.entity), None, "round {round}");
            }
        }
        assert_eq!(dispatcher.registered_drivers().len(), fleet.len());

        let rider = Entity::from_raw(99_999);
        assert_eq!(
            dispatcher.request_driver(rider, Location::new(4_321, 0), &fleet),
            Some(Entity::from_raw(4_321))
        );
    }

    #[test]
    fn display_summarises_registries() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.request_rider(Entity::from_raw(10));
        dispatcher.request_driver(Entity::from_raw(1), Location::new(0, 0), &[]);
        assert_eq!(
            dispatcher.to_string(),
            "Dispatcher: 1 drivers registered, 1 riders waiting"
        );
    }
}
