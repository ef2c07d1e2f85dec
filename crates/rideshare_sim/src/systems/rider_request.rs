use bevy_ecs::prelude::{Entity, World};

use crate::clock::{Event, EventKind};
use crate::dispatcher::{fleet_snapshot, Dispatcher};
use crate::ecs::{Driver, Rider};
use crate::telemetry::{ActivityKind, ActorKind};

use super::notify;

/// A rider asks for a driver. A matched driver starts driving to the rider's
/// origin right away; otherwise the rider joins the waiting list.
///
/// Produces a Pickup (when matched) followed by the rider's Cancellation at its
/// patience deadline.
pub fn handle_rider_request(world: &mut World, now: u64, rider_entity: Entity) -> Vec<Event> {
    let Some(rider) = world.get::<Rider>(rider_entity).cloned() else {
        tracing::warn!(?rider_entity, "rider request for unknown rider");
        return Vec::new();
    };
    if !rider.is_waiting() {
        tracing::warn!(rider = %rider.id, status = ?rider.status(), "repeated rider request ignored");
        return Vec::new();
    }

    notify(world, now, ActorKind::Rider, ActivityKind::Request, &rider.id, rider.origin);

    let fleet = fleet_snapshot(world);
    let matched = world
        .resource_mut::<Dispatcher>()
        .request_driver(rider_entity, rider.origin, &fleet);

    let mut events = Vec::with_capacity(2);
    match matched {
        Some(driver_entity) => {
            if let Some(mut driver) = world.get_mut::<Driver>(driver_entity) {
                let drive = driver.start_drive(rider.origin);
                tracing::trace!(rider = %rider.id, driver = %driver.id, drive, "driver dispatched");
                events.push(Event::new(
                    now.saturating_add(drive),
                    EventKind::Pickup {
                        rider: rider_entity,
                        driver: driver_entity,
                    },
                ));
            }
        }
        None => tracing::trace!(rider = %rider.id, "no idle driver, rider waiting"),
    }

    events.push(Event::new(
        rider.patience.max(now),
        EventKind::Cancellation {
            rider: rider_entity,
        },
    ));
    events
}
