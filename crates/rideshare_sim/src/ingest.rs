//! Event-file ingestion.
//!
//! One event per line: `timestamp eventType id location [extra]`.
//!
//! ```text
//! # comments and blank lines are skipped
//! 0 DriverRequest Dan 1,1 1
//! 3 RiderRequest Amy 2,3 8,9 10
//! ```
//!
//! `DriverRequest` carries the driver's speed; `RiderRequest` carries the
//! destination and the patience (ticks the rider is willing to wait).

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::spatial::{Location, LocationParseError};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: unknown event type {value:?}")]
    UnknownEventType { line: usize, value: String },

    #[error("line {line}: invalid {field} {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: invalid location: {source}")]
    InvalidLocation {
        line: usize,
        #[source]
        source: LocationParseError,
    },

    #[error("line {line}: driver speed must be positive")]
    ZeroSpeed { line: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type IngestResult<T> = Result<T, IngestError>;

/// One parsed request line, before any entity exists for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventRecord {
    DriverRequest {
        timestamp: u64,
        id: String,
        location: Location,
        speed: u32,
    },
    RiderRequest {
        timestamp: u64,
        id: String,
        origin: Location,
        destination: Location,
        patience: u64,
    },
}

impl EventRecord {
    pub fn timestamp(&self) -> u64 {
        match self {
            EventRecord::DriverRequest { timestamp, .. }
            | EventRecord::RiderRequest { timestamp, .. } => *timestamp,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            EventRecord::DriverRequest { id, .. } | EventRecord::RiderRequest { id, .. } => id.as_str(),
        }
    }
}

/// Formats the record back into its event-file line.
impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventRecord::DriverRequest {
                timestamp,
                id,
                location,
                speed,
            } => write!(f, "{timestamp} DriverRequest {id} {location} {speed}"),
            EventRecord::RiderRequest {
                timestamp,
                id,
                origin,
                destination,
                patience,
            } => write!(
                f,
                "{timestamp} RiderRequest {id} {origin} {destination} {patience}"
            ),
        }
    }
}

pub fn read_events(path: impl AsRef<Path>) -> IngestResult<Vec<EventRecord>> {
    let text = std::fs::read_to_string(path)?;
    parse_events(&text)
}

pub fn parse_events(text: &str) -> IngestResult<Vec<EventRecord>> {
    text.lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                None
            } else {
                Some(parse_line(index + 1, line))
            }
        })
        .collect()
}

fn parse_line(line: usize, text: &str) -> IngestResult<EventRecord> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let expect = |expected: usize| {
        if fields.len() == expected {
            Ok(())
        } else {
            Err(IngestError::FieldCount {
                line,
                expected,
                found: fields.len(),
            })
        }
    };
    if fields.len() < 4 {
        return Err(IngestError::FieldCount {
            line,
            expected: 4,
            found: fields.len(),
        });
    }

    let timestamp = number::<u64>(line, "timestamp", fields[0])?;
    let id = fields[2].to_string();
    let at = location(line, fields[3])?;

    match fields[1] {
        "DriverRequest" => {
            expect(5)?;
            let speed = number::<u32>(line, "speed", fields[4])?;
            if speed == 0 {
                return Err(IngestError::ZeroSpeed { line });
            }
            Ok(EventRecord::DriverRequest {
                timestamp,
                id,
                location: at,
                speed,
            })
        }
        "RiderRequest" => {
            expect(6)?;
            Ok(EventRecord::RiderRequest {
                timestamp,
                id,
                origin: at,
                destination: location(line, fields[4])?,
                patience: number::<u64>(line, "patience", fields[5])?,
            })
        }
        other => Err(IngestError::UnknownEventType {
            line,
            value: other.to_string(),
        }),
    }
}

fn number<T: std::str::FromStr>(line: usize, field: &'static str, value: &str) -> IngestResult<T> {
    value.parse().map_err(|_| IngestError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

fn location(line: usize, value: &str) -> IngestResult<Location> {
    value
        .parse()
        .map_err(|source| IngestError::InvalidLocation { line, source })
}
