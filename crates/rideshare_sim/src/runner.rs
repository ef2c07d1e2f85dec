//! Simulation runner: drains the clock and routes each event to its handler.
//!
//! Each step pops the earliest event from [SimulationClock], applies it to the
//! world, then schedules the follow-ups it produced in the order they were
//! returned. Same-timestamp follow-ups therefore run after everything already
//! queued for that timestamp.

use bevy_ecs::prelude::World;

use crate::clock::{Event, EventKind, SimulationClock};
use crate::systems::{
    cancellation::handle_cancellation, driver_request::handle_driver_request,
    dropoff::handle_dropoff, pickup::handle_pickup, rider_request::handle_rider_request,
};
use crate::telemetry::{SimReport, SimTelemetry};

/// Applies one event to the world and returns the events it produced.
pub fn apply_event(world: &mut World, event: Event) -> Vec<Event> {
    let now = event.timestamp;
    match event.kind {
        EventKind::RiderRequest { rider } => handle_rider_request(world, now, rider),
        EventKind::DriverRequest { driver } => handle_driver_request(world, now, driver),
        EventKind::Cancellation { rider } => handle_cancellation(world, now, rider),
        EventKind::Pickup { rider, driver } => handle_pickup(world, now, rider, driver),
        EventKind::Dropoff { rider, driver } => handle_dropoff(world, now, rider, driver),
    }
}

/// Runs one simulation step. Returns `false` if the clock was empty.
pub fn run_next_event(world: &mut World) -> bool {
    run_next_event_with_hook(world, |_, _| {})
}

/// Runs one simulation step and invokes `hook` once the follow-ups are scheduled.
pub fn run_next_event_with_hook<F>(world: &mut World, mut hook: F) -> bool
where
    F: FnMut(&World, &Event),
{
    let Some(event) = world.resource_mut::<SimulationClock>().pop_next() else {
        return false;
    };
    tracing::debug!(timestamp = event.timestamp, kind = event.kind.name(), "processing event");

    let follow_ups = apply_event(world, event);
    {
        let mut clock = world.resource_mut::<SimulationClock>();
        for next in follow_ups {
            clock.schedule(next);
        }
    }
    world
        .resource_mut::<SimTelemetry>()
        .record_event(event.timestamp);

    hook(world, &event);
    true
}

/// Runs simulation steps until the event queue is empty or `max_steps` is reached.
/// Returns the number of steps executed.
pub fn run_until_empty(world: &mut World, max_steps: usize) -> usize {
    run_until_empty_with_hook(world, max_steps, |_, _| {})
}

/// Runs simulation steps until empty and invokes `hook` after each step.
pub fn run_until_empty_with_hook<F>(world: &mut World, max_steps: usize, mut hook: F) -> usize
where
    F: FnMut(&World, &Event),
{
    let mut steps = 0;
    while steps < max_steps && run_next_event_with_hook(world, &mut hook) {
        steps += 1;
    }
    steps
}

/// Drains the queue completely and returns the run's statistics.
pub fn run(world: &mut World) -> SimReport {
    let steps = run_until_empty(world, usize::MAX);
    let report = world.resource::<SimTelemetry>().report();
    tracing::info!(
        steps,
        end_time = report.end_time,
        satisfied = report.riders_satisfied,
        cancelled = report.riders_cancelled,
        "simulation drained"
    );
    report
}
