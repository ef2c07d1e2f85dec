//! Scenario setup: world construction, loading ingested request batches, and
//! generating random ones.

mod build;
mod params;

pub use build::{build_world, generate_events, load_events, random_destination, DriverRoster};
pub use params::{ScenarioParams, SimulationConfig};
