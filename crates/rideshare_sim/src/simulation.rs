//! [Simulation] bundles a prepared world with its configuration: schedule
//! events (or load an ingested batch), then run once to drain the queue.

use bevy_ecs::prelude::World;

use crate::clock::{Event, SimulationClock};
use crate::ingest::EventRecord;
use crate::runner::run_until_empty;
use crate::scenario::{build_world, load_events, SimulationConfig};
use crate::telemetry::{SimReport, SimTelemetry};

pub struct Simulation {
    world: World,
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            world: build_world(config.matching),
            config,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn schedule(&mut self, event: Event) {
        self.world.resource_mut::<SimulationClock>().schedule(event);
    }

    pub fn load(&mut self, records: &[EventRecord]) {
        load_events(&mut self.world, records);
    }

    /// Drains the queue (or stops at `max_steps`) and returns the run's statistics.
    pub fn run(&mut self) -> SimReport {
        let max_steps = self.config.max_steps.unwrap_or(usize::MAX);
        let steps = run_until_empty(&mut self.world, max_steps);
        let pending = self.world.resource::<SimulationClock>().len();
        if pending > 0 {
            tracing::warn!(steps, pending, "step limit reached before the queue drained");
        }
        let report = self.world.resource::<SimTelemetry>().report();
        tracing::info!(
            steps,
            end_time = report.end_time,
            satisfied = report.riders_satisfied,
            cancelled = report.riders_cancelled,
            "simulation finished"
        );
        report
    }
}
