//! Cheapest-fare routing over a time-expanded flight graph.
//!
//! Every (airport, instant) pair becomes a vertex. Flights are priced edges
//! between them, and zero-cost connection edges join events at the same
//! airport that are far enough apart for a passenger to change planes.

pub mod airport;
pub mod dataset;
pub mod error;
pub mod flight;
pub mod graph;
pub mod time;

pub use airport::AirportId;
pub use dataset::FlightSet;
pub use error::{LoadError, RecordError, SearchError, SkippedRecord};
pub use flight::{FlightId, FlightRecord};
pub use graph::graph::{Edge, EdgeId, EdgeKind, Graph, GraphConfig, GraphStats, Vertex, VertexId, build_graph};
pub use graph::itinerary::{FlightLeg, Itinerary, LayoverLeg, Leg};
pub use graph::search::{ShortestPaths, find_cheapest_itinerary};
pub use time::Time;
