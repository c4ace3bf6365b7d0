use crate::airport::AirportId;
use crate::flight::FlightId;
use crate::time::Time;
use thiserror::Error;

/// Why a flight record was left out of the graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("missing field '{field}'")]
    Incomplete { field: &'static str },

    #[error("unrecognised {field} timestamp '{value}'")]
    BadTimestamp { field: &'static str, value: String },

    #[error("unreadable {field} value {value}")]
    Unreadable { field: &'static str, value: String },

    #[error("departure {departure} is not before arrival {arrival}")]
    NonPositiveDuration { departure: Time, arrival: Time },

    #[error("invalid price {0}")]
    InvalidPrice(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub flight_id: Option<FlightId>,
    pub reason: RecordError,
}

impl std::fmt::Display for SkippedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.flight_id {
            Some(id) => write!(f, "{}: {}", id, self.reason),
            None => write!(f, "<unnamed>: {}", self.reason),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("location not found: {}", join(.missing))]
    LocationNotFound { missing: Vec<AirportId> },

    #[error("origin and destination are both {0}")]
    SameLocation(AirportId),
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read flight data: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse flight data: {0}")]
    Json(#[from] serde_json::Error),
}

fn join(codes: &[AirportId]) -> String {
    codes.iter().map(|c| c.as_ref()).collect::<Vec<_>>().join(", ")
}
