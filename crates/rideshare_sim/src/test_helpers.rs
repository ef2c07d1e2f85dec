//! Test helpers for common test setup and utilities.
//!
//! This module provides shared test utilities to reduce duplication across test files.

use bevy_ecs::prelude::{Entity, World};

use crate::clock::{Event, EventKind, SimulationClock};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::matching::MatchingAlgorithmType;
use crate::scenario::build_world;
use crate::spatial::Location;

/// The origin of the test grid.
pub const TEST_ORIGIN: Location = Location::new(0, 0);

/// Create a basic test world with essential resources and the default matching policy.
pub fn create_test_world() -> World {
    build_world(MatchingAlgorithmType::default())
}

/// Spawn a rider whose request expires at absolute time `patience`.
pub fn spawn_rider(
    world: &mut World,
    id: &str,
    origin: Location,
    destination: Location,
    patience: u64,
) -> Entity {
    world.spawn(Rider::new(id, origin, destination, patience)).id()
}

pub fn spawn_driver(world: &mut World, id: &str, location: Location, speed: u32) -> Entity {
    world.spawn(Driver::new(id, location, speed)).id()
}

/// Register `driver` with the dispatcher the way a first driver request would,
/// leaving it idle.
pub fn register_idle_driver(world: &mut World, driver: Entity) {
    let assigned = world.resource_mut::<Dispatcher>().request_rider(driver);
    debug_assert!(assigned.is_none(), "register_idle_driver expects an empty waiting list");
    if let Some(mut state) = world.get_mut::<Driver>(driver) {
        state.idle = true;
    }
}

pub fn schedule(world: &mut World, timestamp: u64, kind: EventKind) {
    world
        .resource_mut::<SimulationClock>()
        .schedule(Event::new(timestamp, kind));
}

pub fn rider(world: &World, entity: Entity) -> &Rider {
    world.get::<Rider>(entity).expect("rider entity")
}

pub fn driver(world: &World, entity: Entity) -> &Driver {
    world.get::<Driver>(entity).expect("driver entity")
}
