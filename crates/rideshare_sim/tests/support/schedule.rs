#![allow(dead_code)]

use bevy_ecs::prelude::World;
use rideshare_sim::clock::{Event, SimulationClock};
use rideshare_sim::runner::{apply_event, run_until_empty_with_hook};

/// Pop every queued event without applying it.
pub fn drain_clock(world: &mut World) -> Vec<Event> {
    let mut clock = world.resource_mut::<SimulationClock>();
    std::iter::from_fn(|| clock.pop_next()).collect()
}

/// Apply a single event directly, bypassing the clock.
pub fn apply(world: &mut World, event: Event) -> Vec<Event> {
    apply_event(world, event)
}

/// Drive the simulation until the event queue is empty, recording every processed event.
pub fn run_recording(world: &mut World) -> Vec<Event> {
    let mut processed = Vec::new();
    run_until_empty_with_hook(world, usize::MAX, |_, event| processed.push(*event));
    processed
}
