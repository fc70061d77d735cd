//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Callers go through the [`Router`] trait, so an A* or contraction-hierarchy
//! engine can replace [`DijkstraRouter`] without touching the session layer.
//!
//! # Cost units
//!
//! All costs are great-circle metres (`f64`).  Relaxation uses a plain
//! strict `<` with no epsilon.
//!
//! # Ties
//!
//! Among equal tentative distances the lowest `VertexId` is settled first.
//! The route cost is minimal regardless; only the choice between equal-cost
//! paths depends on this rule.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use campus_core::{Coordinate, EdgeId, VertexId};

use crate::cancel::CancelToken;
use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.  Recomputed per query, never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Vertices from start to end inclusive.
    pub vertices: Vec<VertexId>,
    /// Arcs traversed, in order.  One shorter than `vertices`.
    pub edges: Vec<EdgeId>,
    /// Vertex coordinates, in the same order as `vertices`.
    pub coordinates: Vec<Coordinate>,
    /// Cumulative great-circle length in metres.
    pub distance_m: f64,
}

impl Route {
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1_000.0
    }

    /// `true` if start and end snapped to the same vertex.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of vertices on the route.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Source feature identifiers along the route, consecutive repeats
    /// collapsed.
    pub fn feature_tags<'n>(&self, network: &'n RoadNetwork) -> Vec<&'n str> {
        let mut tags: Vec<&str> = self.edges.iter().map(|&e| network.feature_tag(e)).collect();
        tags.dedup();
        tags
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can serve concurrent
/// queries against a shared, read-only network.
pub trait Router: Send + Sync {
    /// Compute the shortest route from `from` to `to`.
    ///
    /// Returns `Ok(None)` when the two vertices are not connected; `from ==
    /// to` yields a single-vertex route of length 0.
    ///
    /// # Errors
    ///
    /// [`SpatialError::VertexNotFound`] for an id outside the network, and
    /// [`SpatialError::Cancelled`] / [`SpatialError::TimedOut`] when `cancel`
    /// trips mid-search.
    fn route(
        &self,
        network: &RoadNetwork,
        from: VertexId,
        to: VertexId,
        cancel: &CancelToken,
    ) -> SpatialResult<Option<Route>>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Label-setting shortest path over the CSR graph with a binary heap,
/// O((V + E) log V).
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        network: &RoadNetwork,
        from: VertexId,
        to: VertexId,
        cancel: &CancelToken,
    ) -> SpatialResult<Option<Route>> {
        for v in [from, to] {
            if !network.contains(v) {
                return Err(SpatialError::VertexNotFound(v));
            }
        }
        dijkstra(network, from, to, cancel)
    }
}

// ── Composition with the locator ──────────────────────────────────────────────

/// Snap `start` and `end` to their nearest vertices and route between them.
///
/// Returns `Ok(None)` for an empty network or when the snapped vertices lie
/// in different components.
pub fn plan_route<R: Router + ?Sized>(
    network: &RoadNetwork,
    router: &R,
    start: Coordinate,
    end: Coordinate,
    cancel: &CancelToken,
) -> SpatialResult<Option<Route>> {
    let (Some(from), Some(to)) = (network.locate(start), network.locate(end)) else {
        debug!(%start, %end, "network has no vertices; nothing to route");
        return Ok(None);
    };
    debug!(%start, %end, %from, %to, "snapped route endpoints");

    let route = router.route(network, from, to, cancel)?;
    if route.is_none() {
        debug!(%from, %to, "snapped endpoints are not connected");
    }
    Ok(route)
}

/// [`plan_route`] with [`DijkstraRouter`] and no cancellation.
pub fn shortest_path(network: &RoadNetwork, start: Coordinate, end: Coordinate) -> Option<Route> {
    // Located ids are always in range and the token never trips, so the
    // only possible outcomes are a route or none.
    plan_route(network, &DijkstraRouter, start, end, &CancelToken::new())
        .ok()
        .flatten()
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Heap entry.  Ordering is reversed so `BinaryHeap` pops the smallest cost,
/// then the smallest `VertexId`.
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost:   f64,
    vertex: VertexId,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(
    network: &RoadNetwork,
    from: VertexId,
    to: VertexId,
    cancel: &CancelToken,
) -> SpatialResult<Option<Route>> {
    if from == to {
        return Ok(Some(Route {
            vertices:    vec![from],
            edges:       vec![],
            coordinates: vec![network.vertex_pos(from)],
            distance_m:  0.0,
        }));
    }

    let n = network.vertex_count();
    // dist[v] = best known length (m) to reach v.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = arc that reached v; EdgeId::INVALID for unreached vertices.
    let mut prev_edge = vec![EdgeId::INVALID; n];
    let mut settled   = vec![false; n];

    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(State { cost: 0.0, vertex: from });

    while let Some(State { cost, vertex }) = heap.pop() {
        cancel.check()?;

        if settled[vertex.index()] || cost > dist[vertex.index()] {
            continue;
        }
        if vertex == to {
            return Ok(Some(reconstruct(network, &prev_edge, to, cost)));
        }
        settled[vertex.index()] = true;

        for edge in network.out_edges(vertex) {
            let neighbor = network.edge_to[edge.index()];
            if settled[neighbor.index()] {
                continue;
            }
            let candidate = cost + network.edge_length_m[edge.index()];
            if candidate < dist[neighbor.index()] {
                dist[neighbor.index()] = candidate;
                prev_edge[neighbor.index()] = edge;
                heap.push(State { cost: candidate, vertex: neighbor });
            }
        }
    }

    Ok(None)
}

fn reconstruct(network: &RoadNetwork, prev_edge: &[EdgeId], to: VertexId, total_m: f64) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = network.edge_from[e.index()];
    }
    edges.reverse();

    let mut vertices = Vec::with_capacity(edges.len() + 1);
    vertices.push(cur);
    vertices.extend(edges.iter().map(|e| network.edge_to[e.index()]));

    let coordinates = vertices.iter().map(|&v| network.vertex_pos(v)).collect();
    Route { vertices, edges, coordinates, distance_m: total_m }
}
