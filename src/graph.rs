pub mod graph;
pub mod itinerary;
pub mod search;
