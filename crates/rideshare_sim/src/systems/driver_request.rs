use bevy_ecs::prelude::{Entity, World};

use crate::clock::{Event, EventKind};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::telemetry::{ActivityKind, ActorKind};

use super::notify;

/// A driver asks for work. The dispatcher registers it on first contact and
/// hands over the longest-waiting rider, if any; the driver heads there.
/// With nobody waiting the driver stays idle until a rider request picks it.
///
/// A request from a driver that is already busy is not a request for work: it
/// is dropped with a warning before the reporter is notified, so it leaves no
/// activity behind and produces no events.
pub fn handle_driver_request(world: &mut World, now: u64, driver_entity: Entity) -> Vec<Event> {
    let Some(driver) = world.get::<Driver>(driver_entity) else {
        tracing::warn!(?driver_entity, "driver request for unknown driver");
        return Vec::new();
    };
    if !driver.idle {
        tracing::warn!(driver = %driver.id, "driver request while busy ignored");
        return Vec::new();
    }
    let (driver_id, location) = (driver.id.clone(), driver.location);

    notify(world, now, ActorKind::Driver, ActivityKind::Request, &driver_id, location);

    let assigned = world.resource_mut::<Dispatcher>().request_rider(driver_entity);
    let pickup = assigned.and_then(|rider_entity| {
        let rider = world.get::<Rider>(rider_entity)?;
        debug_assert!(rider.is_waiting(), "waiting list held a non-waiting rider");
        Some((rider_entity, rider.origin))
    });

    let Some(mut driver) = world.get_mut::<Driver>(driver_entity) else {
        return Vec::new();
    };
    match pickup {
        Some((rider_entity, origin)) => {
            let drive = driver.start_drive(origin);
            tracing::trace!(driver = %driver_id, drive, "driver assigned waiting rider");
            vec![Event::new(
                now.saturating_add(drive),
                EventKind::Pickup {
                    rider: rider_entity,
                    driver: driver_entity,
                },
            )]
        }
        None => {
            driver.idle = true;
            Vec::new()
        }
    }
}
