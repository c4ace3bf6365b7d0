use crate::airport::AirportId;
use crate::error::SkippedRecord;
use crate::flight::{FlightId, FlightRecord};
use crate::time::{HOUR, Time};
use petgraph::graph::{DiGraph, EdgeIndex, EdgeReference, NodeIndex};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::{info, warn};

pub type VertexId = NodeIndex;
pub type EdgeId = EdgeIndex;

/// A location at one instant. Two events at the same airport and second share a vertex.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    pub location: AirportId,
    pub time: Time,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EdgeKind {
    Flight { flight_id: FlightId },
    Connection,
}

/// Payload carried by each network edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub cost: f64,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn is_connection(&self) -> bool {
        self.kind == EdgeKind::Connection
    }
}

#[derive(Clone, Debug)]
pub struct GraphConfig {
    /// Shortest layover, in seconds, that still lets a passenger make the next departure.
    pub min_connection: u64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            min_connection: HOUR as u64,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub locations: usize,
    pub vertices: usize,
    pub flight_edges: usize,
    pub connection_edges: usize,
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} locations, {} vertices, {} flight edges, {} connection edges",
            self.locations, self.vertices, self.flight_edges, self.connection_edges
        )
    }
}

/// Time-expanded flight network. Derived wholesale from a record collection and never patched.
#[derive(Debug, Default)]
pub struct Graph {
    network: DiGraph<Vertex, Edge>,
    vertex_index: HashMap<Vertex, VertexId>,
    // per location, ascending by time
    by_location: BTreeMap<AirportId, Vec<VertexId>>,
    skipped: Vec<SkippedRecord>,
}

impl Graph {
    pub fn build(records: &[FlightRecord]) -> Graph {
        Self::build_with(records, &GraphConfig::default())
    }

    pub fn build_with(records: &[FlightRecord], config: &GraphConfig) -> Graph {
        let mut graph = Graph::default();

        for record in records {
            if let Err(reason) = record.validate() {
                warn!(flight = %record.id, %reason, "skipping malformed flight record");
                graph.skipped.push(SkippedRecord {
                    flight_id: Some(record.id.clone()),
                    reason,
                });
                continue;
            }
            let from = graph.intern(&record.origin_id, record.departure_time);
            let to = graph.intern(&record.destination_id, record.arrival_time);
            graph.add_edge(
                from,
                to,
                record.price,
                EdgeKind::Flight {
                    flight_id: record.id.clone(),
                },
            );
        }

        graph.connect_layovers(config.min_connection);

        let stats = graph.stats();
        info!(
            locations = stats.locations,
            vertices = stats.vertices,
            flight_edges = stats.flight_edges,
            connection_edges = stats.connection_edges,
            skipped = graph.skipped.len(),
            "time-expanded graph built"
        );
        graph
    }

    fn intern(&mut self, location: &AirportId, time: Time) -> VertexId {
        let vertex = Vertex {
            location: location.clone(),
            time,
        };
        if let Some(id) = self.vertex_index.get(&vertex) {
            return *id;
        }

        let id = self.network.add_node(vertex.clone());
        self.vertex_index.insert(vertex, id);

        let group = self.by_location.entry(location.clone()).or_default();
        let at = group.partition_point(|v| self.network[*v].time < time);
        group.insert(at, id);
        id
    }

    fn add_edge(&mut self, from: VertexId, to: VertexId, cost: f64, kind: EdgeKind) {
        self.network.add_edge(from, to, Edge { cost, kind });
    }

    /// Links every vertex to each later vertex at the same location that is at
    /// least `min_connection` seconds away.
    fn connect_layovers(&mut self, min_connection: u64) {
        let min_connection = i64::try_from(min_connection).unwrap_or(i64::MAX);
        let mut layovers = vec![];
        for group in self.by_location.values() {
            for (i, from) in group.iter().enumerate() {
                // nothing can follow a vertex this close to the end of time
                let Some(earliest) = self.network[*from].time.checked_add(min_connection) else {
                    continue;
                };
                let rest = &group[i + 1..];
                let start = rest.partition_point(|v| self.network[*v].time < earliest);
                layovers.extend(rest[start..].iter().map(|to| (*from, *to)));
            }
        }

        for (from, to) in layovers {
            self.add_edge(from, to, 0.0, EdgeKind::Connection);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.network.node_count() == 0
    }

    /// The underlying petgraph network, for callers that want its algorithms directly.
    pub fn network(&self) -> &DiGraph<Vertex, Edge> {
        &self.network
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.network[id]
    }

    pub fn vertex_count(&self) -> usize {
        self.network.node_count()
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.network
            .node_indices()
            .map(|id| (id, &self.network[id]))
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.network[id]
    }

    /// Source and target of an edge of this graph.
    pub fn endpoints(&self, id: EdgeId) -> (VertexId, VertexId) {
        let edge = &self.network.raw_edges()[id.index()];
        (edge.source(), edge.target())
    }

    /// Every edge, in insertion order: flights first, then connections.
    pub fn edges(&self) -> impl Iterator<Item = EdgeReference<'_, Edge>> {
        self.network.edge_references()
    }

    pub fn outgoing(&self, id: VertexId) -> impl Iterator<Item = EdgeReference<'_, Edge>> {
        self.network.edges(id)
    }

    pub fn find_vertex(&self, location: &str, time: Time) -> Option<VertexId> {
        self.vertex_index
            .get(&Vertex {
                location: AirportId::from(location),
                time,
            })
            .copied()
    }

    /// Vertices at `location`, earliest first. Empty if the location is unknown.
    pub fn vertices_at(&self, location: &str) -> &[VertexId] {
        self.by_location
            .get(location)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn locations(&self) -> impl Iterator<Item = &AirportId> {
        self.by_location.keys()
    }

    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    pub fn stats(&self) -> GraphStats {
        let connection_edges = self.edges().filter(|e| e.weight().is_connection()).count();
        GraphStats {
            locations: self.by_location.len(),
            vertices: self.network.node_count(),
            flight_edges: self.network.edge_count() - connection_edges,
            connection_edges,
        }
    }
}

pub fn build_graph(records: &[FlightRecord]) -> Graph {
    Graph::build(records)
}
