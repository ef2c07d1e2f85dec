//! Telemetry / KPIs: the reporter hook event handlers notify, and the summary
//! computed from it once a run has drained.

use std::collections::BTreeMap;

use bevy_ecs::prelude::Resource;
use serde::Serialize;

use crate::spatial::{manhattan_distance, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActorKind {
    Rider,
    Driver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityKind {
    Request,
    Cancel,
    Pickup,
    Dropoff,
}

/// One notification received from an event handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub timestamp: u64,
    pub actor: ActorKind,
    pub kind: ActivityKind,
    pub actor_id: String,
    pub location: Location,
}

/// Collects activities in the order they happen. Never feeds back into the simulation.
#[derive(Debug, Default, Resource)]
pub struct SimTelemetry {
    pub activities: Vec<Activity>,
    pub events_processed: u64,
    pub last_event_at: u64,
}

/// Aggregate statistics for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimReport {
    pub events_processed: u64,
    pub end_time: u64,
    pub riders_requested: usize,
    pub riders_satisfied: usize,
    pub riders_cancelled: usize,
    pub drivers: usize,
    /// Mean ticks from request to pickup over riders that were picked up.
    pub rider_wait_time: f64,
    /// Mean distance each driver covered, request to request.
    pub driver_total_distance: f64,
    /// Mean distance each driver covered with a rider aboard.
    pub driver_ride_distance: f64,
}

impl SimTelemetry {
    pub fn notify(
        &mut self,
        timestamp: u64,
        actor: ActorKind,
        kind: ActivityKind,
        actor_id: &str,
        location: Location,
    ) {
        self.activities.push(Activity {
            timestamp,
            actor,
            kind,
            actor_id: actor_id.to_string(),
            location,
        });
    }

    pub fn record_event(&mut self, timestamp: u64) {
        self.events_processed += 1;
        self.last_event_at = timestamp;
    }

    pub fn activities_of(&self, actor: ActorKind) -> impl Iterator<Item = &Activity> + '_ {
        self.activities.iter().filter(move |a| a.actor == actor)
    }

    pub fn report(&self) -> SimReport {
        let riders = group_by_actor(self.activities_of(ActorKind::Rider));
        let drivers = group_by_actor(self.activities_of(ActorKind::Driver));

        let count_riders = |kind: ActivityKind| {
            riders
                .values()
                .filter(|history| history.iter().any(|a| a.kind == kind))
                .count()
        };

        let waits: Vec<u64> = riders
            .values()
            .filter_map(|history| {
                let requested = history.iter().find(|a| a.kind == ActivityKind::Request)?;
                let picked_up = history.iter().find(|a| a.kind == ActivityKind::Pickup)?;
                Some(picked_up.timestamp.saturating_sub(requested.timestamp))
            })
            .collect();

        let total_distances: Vec<u64> = drivers.values().map(|h| path_length(h)).collect();
        let ride_distances: Vec<u64> = drivers.values().map(|h| ride_length(h)).collect();

        SimReport {
            events_processed: self.events_processed,
            end_time: self.last_event_at,
            riders_requested: count_riders(ActivityKind::Request),
            riders_satisfied: count_riders(ActivityKind::Pickup),
            riders_cancelled: count_riders(ActivityKind::Cancel),
            drivers: drivers.len(),
            rider_wait_time: mean(&waits),
            driver_total_distance: mean(&total_distances),
            driver_ride_distance: mean(&ride_distances),
        }
    }
}

fn group_by_actor<'a>(
    activities: impl Iterator<Item = &'a Activity>,
) -> BTreeMap<&'a str, Vec<&'a Activity>> {
    let mut grouped: BTreeMap<&str, Vec<&Activity>> = BTreeMap::new();
    for activity in activities {
        grouped.entry(activity.actor_id.as_str()).or_default().push(activity);
    }
    grouped
}

fn path_length(history: &[&Activity]) -> u64 {
    history
        .windows(2)
        .map(|pair| manhattan_distance(pair[0].location, pair[1].location))
        .fold(0, u64::saturating_add)
}

fn ride_length(history: &[&Activity]) -> u64 {
    let mut total = 0;
    let mut aboard_since: Option<Location> = None;
    for activity in history {
        match activity.kind {
            ActivityKind::Pickup => aboard_since = Some(activity.location),
            ActivityKind::Dropoff => {
                if let Some(pickup) = aboard_since.take() {
                    total = manhattan_distance(pickup, activity.location).saturating_add(total);
                }
            }
            ActivityKind::Request | ActivityKind::Cancel => {}
        }
    }
    total
}

fn mean(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&value| value as f64).sum::<f64>() / values.len() as f64
}
