use std::collections::HashMap;

use bevy_ecs::prelude::{Entity, Resource, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::{EventKind, SimulationClock};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::ingest::EventRecord;
use crate::matching::MatchingAlgorithmType;
use crate::scenario::params::ScenarioParams;
use crate::spatial::Location;
use crate::telemetry::SimTelemetry;

/// Driver entities by id, so repeated requests from one driver reuse its entity.
#[derive(Debug, Default, Resource)]
pub struct DriverRoster(pub HashMap<String, Entity>);

/// A world with every resource the runner and the event handlers expect.
pub fn build_world(matching: MatchingAlgorithmType) -> World {
    let mut world = World::new();
    world.insert_resource(SimulationClock::default());
    world.insert_resource(Dispatcher::new(matching));
    world.insert_resource(SimTelemetry::default());
    world.insert_resource(DriverRoster::default());
    world
}

/// Spawns the entities behind `records` and schedules their request events in
/// record order.
///
/// A rider's relative patience becomes its absolute deadline here. A driver id
/// seen before keeps its first entity (and its first location and speed).
pub fn load_events(world: &mut World, records: &[EventRecord]) {
    for record in records {
        let kind = match record {
            EventRecord::DriverRequest {
                id,
                location,
                speed,
                ..
            } => {
                let driver = driver_entity(world, id, *location, *speed);
                EventKind::DriverRequest { driver }
            }
            EventRecord::RiderRequest {
                timestamp,
                id,
                origin,
                destination,
                patience,
            } => {
                let deadline = timestamp.saturating_add(*patience);
                let rider = world
                    .spawn(Rider::new(id.clone(), *origin, *destination, deadline))
                    .id();
                EventKind::RiderRequest { rider }
            }
        };
        world
            .resource_mut::<SimulationClock>()
            .schedule_at(record.timestamp(), kind);
    }
    tracing::debug!(records = records.len(), "initial events loaded");
}

fn driver_entity(world: &mut World, id: &str, location: Location, speed: u32) -> Entity {
    if let Some(&existing) = world.resource::<DriverRoster>().0.get(id) {
        tracing::trace!(driver = id, "repeated driver request reuses existing driver");
        return existing;
    }
    let entity = world.spawn(Driver::new(id, location, speed)).id();
    world
        .resource_mut::<DriverRoster>()
        .0
        .insert(id.to_string(), entity);
    entity
}

/// Generates a reproducible random request batch, sorted by timestamp.
pub fn generate_events(params: &ScenarioParams) -> Vec<EventRecord> {
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut records = Vec::with_capacity(params.num_drivers + params.num_riders);

    for n in 0..params.num_drivers {
        records.push(EventRecord::DriverRequest {
            timestamp: rng.gen_range(0..params.driver_spread.max(1)),
            id: format!("driver-{n}"),
            location: random_location(&mut rng, params),
            speed: rng.gen_range(params.min_speed..=params.max_speed),
        });
    }

    for n in 0..params.num_riders {
        let origin = random_location(&mut rng, params);
        let destination = random_destination(&mut rng, params, origin);
        records.push(EventRecord::RiderRequest {
            timestamp: rng.gen_range(0..params.request_window.max(1)),
            id: format!("rider-{n}"),
            origin,
            destination,
            patience: rng.gen_range(params.min_patience..=params.max_patience),
        });
    }

    records.sort_by_key(EventRecord::timestamp);
    records
}

fn random_location<R: Rng>(rng: &mut R, params: &ScenarioParams) -> Location {
    Location::new(
        rng.gen_range(0..params.grid_rows),
        rng.gen_range(0..params.grid_columns),
    )
}

/// A destination different from `origin` whenever the grid has more than one block.
pub fn random_destination<R: Rng>(rng: &mut R, params: &ScenarioParams, origin: Location) -> Location {
    const MAX_ATTEMPTS: usize = 16;
    for _ in 0..MAX_ATTEMPTS {
        let candidate = random_location(rng, params);
        if candidate != origin {
            return candidate;
        }
    }
    origin
}
