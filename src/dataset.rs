use crate::airport::normalize_code;
use crate::error::{LoadError, RecordError, SkippedRecord};
use crate::flight::{FlightId, FlightRecord};
use crate::time::Time;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// A flight-record collection read from disk, along with the entries that were dropped.
pub struct FlightSet {
    pub records: Vec<FlightRecord>,
    pub skipped: Vec<SkippedRecord>,
}

/// One entry as it appears on disk. Values stay untyped so that a single bad
/// field drops its own record rather than the whole file.
#[derive(Deserialize)]
struct RawFlight {
    id: Option<Value>,
    origin: Option<Value>,
    destination: Option<Value>,
    departure: Option<Value>,
    arrival: Option<Value>,
    price: Option<Value>,
    airline: Option<Value>,
}

/// Trimmed text, or `None` for absent, null and blank values.
fn text<'a>(field: &'static str, value: Option<&'a Value>) -> Result<Option<&'a str>, RecordError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim()).filter(|s| !s.is_empty())),
        Some(other) => Err(RecordError::Unreadable {
            field,
            value: other.to_string(),
        }),
    }
}

fn timestamp(field: &'static str, value: Option<&Value>) -> Result<Option<Time>, RecordError> {
    let bad = |value: String| RecordError::BadTimestamp { field, value };
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(|secs| Some(Time(secs))).ok_or_else(|| bad(n.to_string())),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Time::parse(s).map(Some).map_err(|_| bad(s.clone())),
        Some(other) => Err(bad(other.to_string())),
    }
}

fn price(value: Option<&Value>) -> Result<Option<f64>, RecordError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(RecordError::Unreadable {
            field: "price",
            value: other.to_string(),
        }),
    }
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, RecordError> {
    value.ok_or(RecordError::Incomplete { field })
}

impl RawFlight {
    fn into_record(self) -> Result<FlightRecord, SkippedRecord> {
        let flight_id: Option<FlightId> = match &self.id {
            Some(Value::Number(n)) => Some(Arc::from(n.to_string())),
            other => text("id", other.as_ref()).ok().flatten().map(Arc::from),
        };
        self.read(flight_id.clone())
            .map_err(|reason| SkippedRecord { flight_id, reason })
    }

    // fields are checked in declaration order; the first problem wins
    fn read(&self, flight_id: Option<FlightId>) -> Result<FlightRecord, RecordError> {
        let id = required("id", flight_id)?;
        let origin = required("origin", text("origin", self.origin.as_ref())?)?;
        let destination = required("destination", text("destination", self.destination.as_ref())?)?;
        let departure_time = required("departure", timestamp("departure", self.departure.as_ref())?)?;
        let arrival_time = required("arrival", timestamp("arrival", self.arrival.as_ref())?)?;
        let price = required("price", price(self.price.as_ref())?)?;
        let airline = text("airline", self.airline.as_ref()).ok().flatten().map(String::from);

        Ok(FlightRecord {
            id,
            origin_id: normalize_code(origin),
            destination_id: normalize_code(destination),
            departure_time,
            arrival_time,
            price,
            airline,
        })
    }
}

impl FlightSet {
    pub fn from_json(data: &str) -> Result<Self, LoadError> {
        #[derive(Deserialize)]
        struct RawData {
            flights: Vec<RawFlight>,
        }
        let raw: RawData = serde_json::from_str(data)?;

        let mut records = Vec::with_capacity(raw.flights.len());
        let mut skipped = vec![];
        for flight in raw.flights {
            match flight.into_record() {
                Ok(record) => records.push(record),
                Err(skip) => {
                    warn!(record = %skip, "skipping unusable flight record");
                    skipped.push(skip);
                }
            }
        }

        Ok(FlightSet { records, skipped })
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let set = Self::from_json(&data)?;
        info!(
            path = %path.display(),
            records = set.records.len(),
            skipped = set.skipped.len(),
            "loaded flight records"
        );
        Ok(set)
    }
}
