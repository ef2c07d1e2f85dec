use bevy_ecs::prelude::Component;
use serde::Serialize;

use crate::spatial::{travel_time, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiderStatus {
    Waiting,
    Cancelled,
    Satisfied,
}

/// A rider request. `status` only ever leaves `Waiting`, once.
#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct Rider {
    pub id: String,
    pub origin: Location,
    pub destination: Location,
    /// Absolute simulation time at which the request expires.
    pub patience: u64,
    status: RiderStatus,
}

impl Rider {
    pub fn new(id: impl Into<String>, origin: Location, destination: Location, patience: u64) -> Self {
        Self {
            id: id.into(),
            origin,
            destination,
            patience,
            status: RiderStatus::Waiting,
        }
    }

    pub fn status(&self) -> RiderStatus {
        self.status
    }

    pub fn is_waiting(&self) -> bool {
        self.status == RiderStatus::Waiting
    }

    /// `Waiting → Satisfied`. Returns `false` (and changes nothing) from any other state.
    pub fn satisfy(&mut self) -> bool {
        self.leave_waiting(RiderStatus::Satisfied)
    }

    /// `Waiting → Cancelled`. Returns `false` (and changes nothing) from any other state.
    pub fn cancel(&mut self) -> bool {
        self.leave_waiting(RiderStatus::Cancelled)
    }

    fn leave_waiting(&mut self, next: RiderStatus) -> bool {
        if self.status != RiderStatus::Waiting {
            return false;
        }
        self.status = next;
        true
    }
}

/// A driver. Identity is the `id`; two drivers with the same id are the same driver.
#[derive(Debug, Clone, Component)]
pub struct Driver {
    pub id: String,
    pub location: Location,
    /// Grid units per tick; always positive.
    pub speed: u32,
    /// Where the driver is currently heading, if anywhere.
    pub destination: Option<Location>,
    pub idle: bool,
}

impl PartialEq for Driver {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Driver {}

impl Driver {
    pub fn new(id: impl Into<String>, location: Location, speed: u32) -> Self {
        debug_assert!(speed > 0, "driver speed must be positive");
        Self {
            id: id.into(),
            location,
            speed,
            destination: None,
            idle: true,
        }
    }

    pub fn travel_time_to(&self, destination: Location) -> u64 {
        travel_time(self.location, destination, self.speed)
    }

    /// Head to a pickup point; returns the drive duration.
    pub fn start_drive(&mut self, pickup: Location) -> u64 {
        self.destination = Some(pickup);
        self.idle = false;
        self.travel_time_to(pickup)
    }

    /// Head to a rider's destination with the rider aboard; returns the ride duration.
    pub fn start_ride(&mut self, dropoff: Location) -> u64 {
        self.start_drive(dropoff)
    }

    /// Arrive at `location`, clearing the current destination.
    pub fn arrive(&mut self, location: Location) {
        self.location = location;
        self.destination = None;
    }

    /// Arrive at the dropoff point and become available again.
    pub fn end_ride(&mut self, dropoff: Location) {
        self.arrive(dropoff);
        self.idle = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rider_status_leaves_waiting_once() {
        let mut rider = Rider::new("r", Location::new(0, 0), Location::new(1, 1), 10);
        assert!(rider.is_waiting());
        assert!(rider.satisfy());
        assert!(!rider.cancel());
        assert!(!rider.satisfy());
        assert_eq!(rider.status(), RiderStatus::Satisfied);

        let mut other = Rider::new("o", Location::new(0, 0), Location::new(1, 1), 10);
        assert!(other.cancel());
        assert!(!other.satisfy());
        assert_eq!(other.status(), RiderStatus::Cancelled);
    }

    #[test]
    fn driver_drive_and_ride_cycle() {
        let mut driver = Driver::new("d", Location::new(0, 0), 2);
        assert!(driver.idle);

        let drive = driver.start_drive(Location::new(3, 3));
        assert_eq!(drive, 3);
        assert!(!driver.idle);
        assert_eq!(driver.destination, Some(Location::new(3, 3)));

        driver.arrive(Location::new(3, 3));
        assert_eq!(driver.location, Location::new(3, 3));
        assert_eq!(driver.destination, None);

        let ride = driver.start_ride(Location::new(3, 7));
        assert_eq!(ride, 2);
        driver.end_ride(Location::new(3, 7));
        assert!(driver.idle);
        assert_eq!(driver.location, Location::new(3, 7));
    }

    #[test]
    fn drivers_compare_by_id() {
        let a = Driver::new("same", Location::new(0, 0), 1);
        let b = Driver::new("same", Location::new(5, 5), 3);
        let c = Driver::new("other", Location::new(0, 0), 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
