//! Nearest-vertex lookup.
//!
//! The default is an exhaustive haversine scan, which is fine for campus-sized
//! graphs (low thousands of vertices, two lookups per route).  Larger networks
//! can opt into [`SpatialIndex`] through `LocatorKind::SpatialIndex`; the
//! contract is the same.
//!
//! # Ties
//!
//! The linear scan keeps the first vertex (lowest `VertexId`) among equally
//! near candidates.  The R-tree makes no such promise, so the two locators may
//! disagree on exact ties.  Both are accepted behaviour.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use campus_core::{Coordinate, VertexId};

use crate::network::RoadNetwork;

impl RoadNetwork {
    /// Return the vertex nearest to `pos` by great-circle distance.
    ///
    /// Returns `None` only if the network has no vertices.
    pub fn locate(&self, pos: Coordinate) -> Option<VertexId> {
        match &self.spatial_idx {
            Some(idx) if pos.is_finite() => idx.nearest(pos),
            _ => self.locate_linear(pos),
        }
    }

    /// Exhaustive scan over all vertices; first vertex wins ties.
    pub fn locate_linear(&self, pos: Coordinate) -> Option<VertexId> {
        self.vertex_pos
            .iter()
            .enumerate()
            .map(|(i, &v)| (i, pos.distance_m(v)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| VertexId(i as u32))
    }

    /// Great-circle distance from `pos` to the vertex `locate` would return,
    /// paired with that vertex.
    pub fn locate_with_distance(&self, pos: Coordinate) -> Option<(VertexId, f64)> {
        self.locate(pos).map(|v| (v, pos.distance_m(self.vertex_pos(v))))
    }
}

// ── R-tree spatial index ──────────────────────────────────────────────────────

/// Entry stored in the R-tree: a unit-sphere point with its `VertexId`.
#[derive(Clone)]
struct VertexEntry {
    point: [f64; 3],
    id:    VertexId,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    /// Squared chord length on the unit sphere.  Orders candidates exactly as
    /// haversine distance does.
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// R-tree over vertex positions, bulk-loaded once when the network is built.
pub struct SpatialIndex {
    tree: RTree<VertexEntry>,
}

impl SpatialIndex {
    pub(crate) fn build(vertices: &[Coordinate]) -> Self {
        let entries: Vec<VertexEntry> = vertices
            .iter()
            .enumerate()
            .map(|(i, &pos)| VertexEntry { point: pos.unit_vector(), id: VertexId(i as u32) })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn nearest(&self, pos: Coordinate) -> Option<VertexId> {
        self.tree.nearest_neighbor(&pos.unit_vector()).map(|e| e.id)
    }

    /// Up to `k` nearest vertices, ascending by distance.
    pub fn k_nearest(&self, pos: Coordinate, k: usize) -> Vec<VertexId> {
        self.tree
            .nearest_neighbor_iter(&pos.unit_vector())
            .take(k)
            .map(|e| e.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
