use crate::airport::AirportId;
use crate::error::RecordError;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tabled::Tabled;

pub type FlightId = Arc<str>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tabled)]
pub struct FlightRecord {
    #[tabled(rename = "Flight")]
    pub id: FlightId,
    #[tabled(rename = "From")]
    pub origin_id: AirportId,
    #[tabled(rename = "To")]
    pub destination_id: AirportId,
    #[tabled(rename = "Departure")]
    pub departure_time: Time,
    #[tabled(rename = "Arrival")]
    pub arrival_time: Time,
    #[tabled(rename = "Price")]
    pub price: f64,
    #[tabled(rename = "Airline", display = "display_airline")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
}

fn display_airline(airline: &Option<String>) -> String {
    airline.clone().unwrap_or_default()
}

impl FlightRecord {
    pub fn new(
        id: &str,
        origin_id: &str,
        destination_id: &str,
        departure_time: Time,
        arrival_time: Time,
        price: f64,
    ) -> FlightRecord {
        FlightRecord {
            id: Arc::from(id),
            origin_id: Arc::from(origin_id),
            destination_id: Arc::from(destination_id),
            departure_time,
            arrival_time,
            price,
            airline: None,
        }
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        if self.departure_time >= self.arrival_time {
            return Err(RecordError::NonPositiveDuration {
                departure: self.departure_time,
                arrival: self.arrival_time,
            });
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(RecordError::InvalidPrice(self.price));
        }
        Ok(())
    }

    pub fn touches(&self, airport_id: &str) -> bool {
        *self.origin_id == *airport_id || *self.destination_id == *airport_id
    }
}
