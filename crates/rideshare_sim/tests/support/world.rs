#![allow(dead_code)]

use bevy_ecs::prelude::World;
use rideshare_sim::matching::MatchingAlgorithmType;
use rideshare_sim::scenario::build_world;

/// Builder configuration for reproducible test worlds.
#[derive(Clone, Debug, Default)]
pub struct TestWorldConfig {
    pub matching: MatchingAlgorithmType,
}

/// Helper that populates the ECS world with all shared resources used in integration tests.
#[derive(Debug, Default)]
pub struct TestWorldBuilder {
    config: TestWorldConfig,
}

impl TestWorldBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the matching policy the dispatcher uses.
    pub fn with_matching(mut self, matching: MatchingAlgorithmType) -> Self {
        self.config.matching = matching;
        self
    }

    pub fn build(self) -> World {
        build_world(self.config.matching)
    }
}
