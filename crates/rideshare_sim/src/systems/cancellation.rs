use bevy_ecs::prelude::{Entity, World};

use crate::clock::Event;
use crate::dispatcher::{DispatchError, Dispatcher};
use crate::ecs::Rider;
use crate::telemetry::{ActivityKind, ActorKind};

use super::notify;

/// The rider's patience deadline. A rider still waiting gives up; a rider
/// already picked up (or cancelled) is left alone.
pub fn handle_cancellation(world: &mut World, now: u64, rider_entity: Entity) -> Vec<Event> {
    let (rider_id, origin) = {
        let Some(mut rider) = world.get_mut::<Rider>(rider_entity) else {
            tracing::warn!(?rider_entity, "cancellation for unknown rider");
            return Vec::new();
        };
        if now < rider.patience || !rider.cancel() {
            return Vec::new();
        }
        (rider.id.clone(), rider.origin)
    };

    match world.resource_mut::<Dispatcher>().cancel_ride(rider_entity) {
        Ok(()) => tracing::trace!(rider = %rider_id, "cancelled while on waiting list"),
        // A driver is already on the way; the Pickup sees the cancellation.
        Err(DispatchError::RiderNotWaiting(_)) => {
            tracing::trace!(rider = %rider_id, "cancelled before pickup")
        }
    }

    notify(world, now, ActorKind::Rider, ActivityKind::Cancel, &rider_id, origin);
    Vec::new()
}
