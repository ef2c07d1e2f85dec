use bevy_ecs::prelude::{Entity, World};

use crate::clock::{Event, EventKind};
use crate::ecs::{Driver, Rider, RiderStatus};
use crate::telemetry::{ActivityKind, ActorKind};

use super::notify;

/// The driver reaches the rider's origin.
///
/// - Rider waiting, deadline not reached: the ride starts, a Dropoff follows.
/// - Rider waiting, deadline reached: the rider gives up on the spot.
/// - Rider cancelled: the driver is freed.
/// - Rider already satisfied: nothing happens, the driver is not touched.
///
/// A freed driver asks for another rider at the same timestamp.
pub fn handle_pickup(
    world: &mut World,
    now: u64,
    rider_entity: Entity,
    driver_entity: Entity,
) -> Vec<Event> {
    let Some(rider) = world.get::<Rider>(rider_entity).cloned() else {
        tracing::warn!(?rider_entity, "pickup for unknown rider");
        return Vec::new();
    };
    if rider.status() == RiderStatus::Satisfied {
        // Another pickup already took this rider; leave the driver untouched.
        tracing::warn!(rider = %rider.id, ?driver_entity, "pickup for satisfied rider ignored");
        return Vec::new();
    }
    let boards = rider.is_waiting() && now < rider.patience;

    let (driver_id, ride) = {
        let Some(mut driver) = world.get_mut::<Driver>(driver_entity) else {
            tracing::warn!(?driver_entity, "pickup by unknown driver");
            return Vec::new();
        };
        driver.arrive(rider.origin);
        let ride = if boards {
            Some(driver.start_ride(rider.destination))
        } else {
            driver.idle = true;
            None
        };
        (driver.id.clone(), ride)
    };

    if let Some(ride) = ride {
        if let Some(mut boarded) = world.get_mut::<Rider>(rider_entity) {
            boarded.satisfy();
        }
        notify(world, now, ActorKind::Rider, ActivityKind::Pickup, &rider.id, rider.origin);
        notify(world, now, ActorKind::Driver, ActivityKind::Pickup, &driver_id, rider.origin);
        tracing::trace!(rider = %rider.id, driver = %driver_id, ride, "ride started");
        return vec![Event::new(
            now.saturating_add(ride),
            EventKind::Dropoff {
                rider: rider_entity,
                driver: driver_entity,
            },
        )];
    }

    if rider.is_waiting() {
        // Deadline reached just as the driver arrived.
        if let Some(mut expired) = world.get_mut::<Rider>(rider_entity) {
            expired.cancel();
        }
        notify(world, now, ActorKind::Rider, ActivityKind::Cancel, &rider.id, rider.origin);
    }
    tracing::trace!(rider = %rider.id, driver = %driver_id, "rider gone, driver freed");
    vec![Event::new(
        now,
        EventKind::DriverRequest {
            driver: driver_entity,
        },
    )]
}
