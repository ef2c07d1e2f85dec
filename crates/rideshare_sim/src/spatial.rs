//! Spatial model: integer grid locations with a Manhattan metric.
//!
//! This module provides:
//!
//! - **Location**: a `(row, column)` value type, serialized as `"row,col"`
//! - **manhattan_distance**: `|Δrow| + |Δcolumn|`
//! - **travel_time**: distance over speed, rounded to the nearest tick
//!
//! Rounding uses round-half-to-even so that a distance of exactly half a tick
//! per unit speed lands on the even neighbour (5/2 → 2, 7/2 → 4).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    pub row: i64,
    pub column: i64,
}

impl Location {
    pub const fn new(row: i64, column: i64) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationParseError {
    #[error("expected \"row,col\", found {0:?}")]
    Shape(String),

    #[error("invalid coordinate {0:?}")]
    Coordinate(String),
}

impl FromStr for Location {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, column) = s
            .trim()
            .split_once(',')
            .ok_or_else(|| LocationParseError::Shape(s.to_string()))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| LocationParseError::Coordinate(part.to_string()))
        };
        Ok(Self::new(parse(row)?, parse(column)?))
    }
}

/// Saturates at `u64::MAX` for points at opposite corners of the `i64` plane.
pub fn manhattan_distance(origin: Location, destination: Location) -> u64 {
    origin
        .row
        .abs_diff(destination.row)
        .saturating_add(origin.column.abs_diff(destination.column))
}

/// Ticks needed to cover `from → to` at `speed` grid units per tick.
pub fn travel_time(from: Location, to: Location, speed: u32) -> u64 {
    debug_assert!(speed > 0, "speed must be positive");
    let distance = manhattan_distance(from, to);
    let speed = u64::from(speed.max(1));
    let quotient = distance / speed;
    let twice_remainder = 2 * (distance % speed);
    if twice_remainder > speed || (twice_remainder == speed && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}
