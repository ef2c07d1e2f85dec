//! Event handlers: one module per [EventKind](crate::clock::EventKind) variant.
//!
//! Every handler takes the world and the current time, mutates rider, driver and
//! dispatcher state, and returns the follow-up events in the order they must be
//! scheduled. Follow-ups are never earlier than `now`; their timestamps saturate
//! at `u64::MAX` rather than wrap.

pub mod cancellation;
pub mod driver_request;
pub mod dropoff;
pub mod pickup;
pub mod rider_request;

use bevy_ecs::prelude::World;

use crate::spatial::Location;
use crate::telemetry::{ActivityKind, ActorKind, SimTelemetry};

fn notify(
    world: &mut World,
    timestamp: u64,
    actor: ActorKind,
    kind: ActivityKind,
    actor_id: &str,
    location: Location,
) {
    world
        .resource_mut::<SimTelemetry>()
        .notify(timestamp, actor, kind, actor_id, location);
}
