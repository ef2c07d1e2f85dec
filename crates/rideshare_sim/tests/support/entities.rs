#![allow(dead_code)]

use bevy_ecs::prelude::{Entity, World};
use rideshare_sim::dispatcher::Dispatcher;
use rideshare_sim::ecs::{Driver, Rider};
use rideshare_sim::spatial::Location;

/// Lifecycle states we can assign to rider entities during setup.
#[derive(Clone, Copy, Debug, Default)]
pub enum RiderLifecycleState {
    /// Requested and on the dispatcher's waiting list.
    Queued,
    /// Waiting with no dispatcher bookkeeping (fresh or already matched).
    #[default]
    Waiting,
    Satisfied,
    Cancelled,
}

/// Builder for simple rider fixtures.
#[derive(Clone, Debug)]
pub struct RiderBuilder {
    id: String,
    origin: Location,
    destination: Location,
    patience: u64,
    state: RiderLifecycleState,
}

impl Default for RiderBuilder {
    fn default() -> Self {
        Self {
            id: "rider".to_string(),
            origin: Location::new(0, 0),
            destination: Location::new(10, 10),
            patience: 50,
            state: RiderLifecycleState::Waiting,
        }
    }
}

impl RiderBuilder {
    /// Create a fresh builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_origin(mut self, origin: Location) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_destination(mut self, destination: Location) -> Self {
        self.destination = destination;
        self
    }

    /// Absolute deadline.
    pub fn with_patience(mut self, deadline: u64) -> Self {
        self.patience = deadline;
        self
    }

    pub fn with_state(mut self, state: RiderLifecycleState) -> Self {
        self.state = state;
        self
    }

    /// Spawn the rider fixture into the provided world.
    pub fn spawn(self, world: &mut World) -> Entity {
        let mut rider = Rider::new(self.id, self.origin, self.destination, self.patience);
        match self.state {
            RiderLifecycleState::Queued | RiderLifecycleState::Waiting => {}
            RiderLifecycleState::Satisfied => {
                rider.satisfy();
            }
            RiderLifecycleState::Cancelled => {
                rider.cancel();
            }
        }
        let entity = world.spawn(rider).id();

        if let RiderLifecycleState::Queued = self.state {
            // With no fleet offered the dispatcher always queues the rider.
            let matched = world
                .resource_mut::<Dispatcher>()
                .request_driver(entity, self.origin, &[]);
            assert!(matched.is_none());
        }
        entity
    }
}

/// Lifecycle states we can assign to driver entities during setup.
#[derive(Clone, Copy, Debug, Default)]
pub enum DriverLifecycleState {
    /// Never requested a rider.
    #[default]
    Unregistered,
    /// Registered with the dispatcher and idle.
    Idle,
    /// Registered and driving towards `destination`.
    Busy(Location),
}

/// Builder for simple driver fixtures.
#[derive(Clone, Debug)]
pub struct DriverBuilder {
    id: String,
    location: Location,
    speed: u32,
    state: DriverLifecycleState,
}

impl Default for DriverBuilder {
    fn default() -> Self {
        Self {
            id: "driver".to_string(),
            location: Location::new(0, 0),
            speed: 1,
            state: DriverLifecycleState::Unregistered,
        }
    }
}

impl DriverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_state(mut self, state: DriverLifecycleState) -> Self {
        self.state = state;
        self
    }

    /// Spawn the driver fixture into the provided world.
    pub fn spawn(self, world: &mut World) -> Entity {
        let mut driver = Driver::new(self.id, self.location, self.speed);
        if let DriverLifecycleState::Busy(destination) = self.state {
            driver.start_drive(destination);
        }
        let entity = world.spawn(driver).id();

        match self.state {
            DriverLifecycleState::Unregistered => {}
            DriverLifecycleState::Idle | DriverLifecycleState::Busy(_) => {
                let mut dispatcher = world.resource_mut::<Dispatcher>();
                let waiting_before = dispatcher.waiting_len();
                assert_eq!(waiting_before, 0, "register drivers before queueing riders");
                dispatcher.request_rider(entity);
            }
        }
        entity
    }
}
