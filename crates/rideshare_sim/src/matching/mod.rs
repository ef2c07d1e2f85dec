pub mod algorithm;
pub mod nearest;
pub mod simple;
pub mod types;

use serde::{Deserialize, Serialize};

pub use algorithm::MatchingAlgorithm;
pub use nearest::NearestIdleMatching;
pub use simple::FirstIdleMatching;
pub use types::DriverCandidate;

/// Selects the matching policy the dispatcher uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchingAlgorithmType {
    #[default]
    NearestIdle,
    FirstIdle,
}

impl MatchingAlgorithmType {
    pub fn build(self) -> Box<dyn MatchingAlgorithm> {
        match self {
            MatchingAlgorithmType::NearestIdle => Box::new(NearestIdleMatching),
            MatchingAlgorithmType::FirstIdle => Box::new(FirstIdleMatching),
        }
    }
}
