pub mod spatial;
pub mod clock;
pub mod ecs;
pub mod dispatcher;
pub mod matching;
pub mod systems;
pub mod runner;
pub mod simulation;
pub mod scenario;
pub mod telemetry;
pub mod ingest;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
