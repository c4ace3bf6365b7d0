use crate::airport::{AirportId, normalize_code};
use crate::error::SearchError;
use crate::graph::graph::{EdgeId, Graph, VertexId};
use crate::graph::itinerary::Itinerary;
use petgraph::Direction;
use petgraph::algo::dijkstra;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use tracing::{debug, info, trace};

/// Single-source cheapest costs over a graph with non-negative weights.
pub struct ShortestPaths {
    source: VertexId,
    cost: HashMap<VertexId, f64>,
}

impl ShortestPaths {
    pub fn from(graph: &Graph, source: VertexId) -> ShortestPaths {
        let cost = dijkstra(graph.network(), source, None, |e| e.weight().cost);
        ShortestPaths { source, cost }
    }

    pub fn cost_to(&self, target: VertexId) -> Option<f64> {
        self.cost.get(&target).copied()
    }

    /// Edges from the source to `target`, in travel order.
    ///
    /// Walks back from `target` along incoming edges whose cost accounts
    /// exactly for the settled cost of their head, taking the earliest-added
    /// such edge. Every edge moves forward in time, so the walk ends at the source.
    pub fn path_to(&self, graph: &Graph, target: VertexId) -> Option<Vec<EdgeId>> {
        let mut remaining = self.cost_to(target)?;
        let mut path = vec![];
        let mut at = target;
        while at != self.source {
            let (edge, before) = graph
                .network()
                .edges_directed(at, Direction::Incoming)
                .filter_map(|e| Some((e, self.cost_to(e.source())?)))
                .filter(|(e, before)| before + e.weight().cost == remaining)
                .min_by_key(|(e, _)| e.id())?;
            path.push(edge.id());
            at = edge.source();
            remaining = before;
        }
        path.reverse();
        Some(path)
    }
}

/// Cheapest itinerary from any departure at `origin` to any arrival at `destination`.
///
/// Runs one Dijkstra per origin vertex. Origins and destinations are visited
/// earliest first and a candidate only replaces the incumbent when strictly
/// cheaper, so among equal-cost routes the first one found is kept.
///
/// Returns `Ok(None)` when both locations exist but no feasible route joins them.
pub fn find_cheapest_itinerary(
    graph: &Graph,
    origin: &str,
    destination: &str,
) -> Result<Option<Itinerary>, SearchError> {
    let origin = normalize_code(origin);
    let destination = normalize_code(destination);
    if origin == destination {
        return Err(SearchError::SameLocation(origin));
    }

    let origin_vertices = graph.vertices_at(&origin);
    let destination_vertices = graph.vertices_at(&destination);
    let missing = [(&origin, origin_vertices), (&destination, destination_vertices)]
        .into_iter()
        .filter(|(_, vertices)| vertices.is_empty())
        .map(|(code, _)| code.clone())
        .collect::<Vec<AirportId>>();
    if !missing.is_empty() {
        return Err(SearchError::LocationNotFound { missing });
    }

    debug!(
        %origin,
        %destination,
        origins = origin_vertices.len(),
        destinations = destination_vertices.len(),
        "searching cheapest itinerary"
    );

    let mut best: Option<(f64, Vec<EdgeId>)> = None;
    for source in origin_vertices {
        let paths = ShortestPaths::from(graph, *source);
        trace!(source = %graph.vertex(*source).time, "shortest paths computed");
        for target in destination_vertices {
            let Some(cost) = paths.cost_to(*target) else {
                continue;
            };
            if best.as_ref().is_some_and(|(incumbent, _)| cost >= *incumbent) {
                continue;
            }
            if let Some(path) = paths.path_to(graph, *target) {
                best = Some((cost, path));
            }
        }
    }

    match best {
        Some((cost, path)) => {
            let itinerary = Itinerary::from_path(graph, &path, cost);
            info!(
                %origin,
                %destination,
                total_cost = cost,
                legs = itinerary.legs.len(),
                "cheapest itinerary found"
            );
            Ok(Some(itinerary))
        }
        None => {
            info!(%origin, %destination, "no feasible itinerary");
            Ok(None)
        }
    }
}
