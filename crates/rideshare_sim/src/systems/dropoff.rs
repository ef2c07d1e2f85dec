use bevy_ecs::prelude::{Entity, World};

use crate::clock::{Event, EventKind};
use crate::ecs::{Driver, Rider, RiderStatus};
use crate::telemetry::{ActivityKind, ActorKind};

use super::notify;

/// The driver reaches the rider's destination, becomes idle there and
/// immediately asks for the next rider.
pub fn handle_dropoff(
    world: &mut World,
    now: u64,
    rider_entity: Entity,
    driver_entity: Entity,
) -> Vec<Event> {
    let (rider_id, destination) = {
        let Some(mut rider) = world.get_mut::<Rider>(rider_entity) else {
            tracing::warn!(?rider_entity, "dropoff for unknown rider");
            return Vec::new();
        };
        if !rider.satisfy() && rider.status() == RiderStatus::Cancelled {
            tracing::warn!(rider = %rider.id, "dropoff for cancelled rider");
        }
        (rider.id.clone(), rider.destination)
    };

    let driver_id = {
        let Some(mut driver) = world.get_mut::<Driver>(driver_entity) else {
            tracing::warn!(?driver_entity, "dropoff by unknown driver");
            return Vec::new();
        };
        driver.end_ride(destination);
        driver.id.clone()
    };

    notify(world, now, ActorKind::Rider, ActivityKind::Dropoff, &rider_id, destination);
    notify(world, now, ActorKind::Driver, ActivityKind::Dropoff, &driver_id, destination);

    vec![Event::new(
        now,
        EventKind::DriverRequest {
            driver: driver_entity,
        },
    )]
}
