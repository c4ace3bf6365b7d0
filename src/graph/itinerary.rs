use crate::airport::AirportId;
use crate::flight::FlightId;
use crate::graph::graph::{EdgeId, EdgeKind, Graph};
use crate::time::{HOUR, Time};
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use tabled::Tabled;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlightLeg {
    pub origin: AirportId,
    pub destination: AirportId,
    pub departure: Time,
    pub arrival: Time,
    pub flight_id: FlightId,
    pub price: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoverLeg {
    pub location: AirportId,
    pub from: Time,
    pub until: Time,
}

impl LayoverLeg {
    /// Waiting time in seconds.
    pub fn duration(&self) -> i64 {
        self.until - self.from
    }

    /// Waiting time in hours, one decimal place.
    pub fn hours(&self) -> String {
        Time::hours_between(self.from, self.until)
    }
}

// Carries the derived wait alongside the raw interval.
impl Serialize for LayoverLeg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LayoverLeg", 5)?;
        state.serialize_field("location", &self.location)?;
        state.serialize_field("from", &self.from)?;
        state.serialize_field("until", &self.until)?;
        state.serialize_field("duration", &self.duration())?;
        state.serialize_field("hours", &self.hours())?;
        state.end()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Leg {
    Flight(FlightLeg),
    Layover(LayoverLeg),
}

#[derive(Tabled)]
pub struct LegRow {
    #[tabled(rename = "Leg")]
    pub kind: &'static str,
    #[tabled(rename = "Flight")]
    pub flight: String,
    #[tabled(rename = "From")]
    pub from: String,
    #[tabled(rename = "To")]
    pub to: String,
    #[tabled(rename = "Departure")]
    pub departure: String,
    #[tabled(rename = "Arrival")]
    pub arrival: String,
    #[tabled(rename = "Price / Wait")]
    pub detail: String,
}

impl Leg {
    pub fn row(&self) -> LegRow {
        match self {
            Leg::Flight(f) => LegRow {
                kind: "flight",
                flight: f.flight_id.to_string(),
                from: f.origin.to_string(),
                to: f.destination.to_string(),
                departure: f.departure.to_string(),
                arrival: f.arrival.to_string(),
                detail: format!("{:.2}", f.price),
            },
            Leg::Layover(l) => LegRow {
                kind: "layover",
                flight: String::new(),
                from: l.location.to_string(),
                to: l.location.to_string(),
                departure: l.from.to_string(),
                arrival: l.until.to_string(),
                detail: format!("{}h", l.hours()),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Itinerary {
    pub legs: Vec<Leg>,
    pub total_cost: f64,
}

impl Itinerary {
    /// Translates a chain of edges into legs, one leg per edge.
    pub fn from_path(graph: &Graph, path: &[EdgeId], total_cost: f64) -> Itinerary {
        let legs = path
            .iter()
            .map(|id| {
                let edge = graph.edge(*id);
                let (from, to) = graph.endpoints(*id);
                let (from, to) = (graph.vertex(from), graph.vertex(to));
                match &edge.kind {
                    EdgeKind::Flight { flight_id } => Leg::Flight(FlightLeg {
                        origin: from.location.clone(),
                        destination: to.location.clone(),
                        departure: from.time,
                        arrival: to.time,
                        flight_id: flight_id.clone(),
                        price: edge.cost,
                    }),
                    EdgeKind::Connection => Leg::Layover(LayoverLeg {
                        location: from.location.clone(),
                        from: from.time,
                        until: to.time,
                    }),
                }
            })
            .collect();

        Itinerary { legs, total_cost }
    }

    pub fn flights(&self) -> impl Iterator<Item = &FlightLeg> {
        self.legs.iter().filter_map(|leg| match leg {
            Leg::Flight(f) => Some(f),
            Leg::Layover(_) => None,
        })
    }

    pub fn layovers(&self) -> impl Iterator<Item = &LayoverLeg> {
        self.legs.iter().filter_map(|leg| match leg {
            Leg::Layover(l) => Some(l),
            Leg::Flight(_) => None,
        })
    }

    /// Intermediate airports where the passenger changes planes.
    pub fn stops(&self) -> usize {
        self.flights().count().saturating_sub(1)
    }

    pub fn departure(&self) -> Option<Time> {
        self.flights().next().map(|f| f.departure)
    }

    pub fn arrival(&self) -> Option<Time> {
        self.flights().last().map(|f| f.arrival)
    }

    /// Door-to-door travel time in hours, from first takeoff to last landing.
    pub fn travel_hours(&self) -> Option<f64> {
        match (self.departure(), self.arrival()) {
            (Some(dep), Some(arr)) => Some((arr - dep) as f64 / HOUR as f64),
            _ => None,
        }
    }

    pub fn rows(&self) -> Vec<LegRow> {
        self.legs.iter().map(Leg::row).collect()
    }
}
