use crate::matching::MatchingAlgorithmType;

/// Default grid: 50 × 50 blocks.
const DEFAULT_GRID_SIZE: i64 = 50;

/// Default time window for generated rider requests (ticks).
const DEFAULT_REQUEST_WINDOW: u64 = 500;

/// How a run is configured, independently of where its events come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationConfig {
    pub matching: MatchingAlgorithmType,
    /// Upper bound on processed events. `None` drains the queue completely.
    pub max_steps: Option<usize>,
}

impl SimulationConfig {
    pub fn with_matching(mut self, matching: MatchingAlgorithmType) -> Self {
        self.matching = matching;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}

/// Parameters for generating a random request batch.
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub num_riders: usize,
    pub num_drivers: usize,
    pub seed: Option<u64>,
    pub grid_rows: i64,
    pub grid_columns: i64,
    /// Rider requests are spread uniformly over `[0, request_window)`.
    pub request_window: u64,
    /// Driver requests are spread uniformly over `[0, driver_spread)`.
    pub driver_spread: u64,
    pub min_patience: u64,
    pub max_patience: u64,
    pub min_speed: u32,
    pub max_speed: u32,
    pub matching: MatchingAlgorithmType,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            num_riders: 200,
            num_drivers: 40,
            seed: None,
            grid_rows: DEFAULT_GRID_SIZE,
            grid_columns: DEFAULT_GRID_SIZE,
            request_window: DEFAULT_REQUEST_WINDOW,
            driver_spread: DEFAULT_REQUEST_WINDOW / 10,
            min_patience: 10,
            max_patience: 60,
            min_speed: 1,
            max_speed: 3,
            matching: MatchingAlgorithmType::default(),
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_grid(mut self, rows: i64, columns: i64) -> Self {
        self.grid_rows = rows.max(1);
        self.grid_columns = columns.max(1);
        self
    }

    pub fn with_request_window(mut self, ticks: u64) -> Self {
        self.request_window = ticks;
        self
    }

    pub fn with_driver_spread(mut self, ticks: u64) -> Self {
        self.driver_spread = ticks;
        self
    }

    pub fn with_patience_range(mut self, min: u64, max: u64) -> Self {
        self.min_patience = min.min(max);
        self.max_patience = max.max(min);
        self
    }

    /// Speeds are clamped to at least 1.
    pub fn with_speed_range(mut self, min: u32, max: u32) -> Self {
        self.min_speed = min.max(1);
        self.max_speed = max.max(self.min_speed);
        self
    }

    pub fn with_matching(mut self, matching: MatchingAlgorithmType) -> Self {
        self.matching = matching;
        self
    }

    pub fn config(&self) -> SimulationConfig {
        SimulationConfig::default().with_matching(self.matching)
    }
}
