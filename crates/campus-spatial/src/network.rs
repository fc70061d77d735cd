//! Road graph representation and builder.
//!
//! # Vertex identity
//!
//! Every polyline vertex is keyed by its coordinate rounded to a fixed number
//! of decimal places ([`Coordinate::key`]).  Lines that share an endpoint under
//! that rule share a vertex, which is how separately digitised roads connect.
//! The first raw coordinate seen for a key becomes the vertex position.
//!
//! # Data layout
//!
//! The finished graph uses **Compressed Sparse Row (CSR)** format.  Given a
//! `VertexId v`, its outgoing arcs occupy the slice:
//!
//! ```text
//! edge_to[ vertex_out_start[v] .. vertex_out_start[v+1] ]
//! ```
//!
//! Each road segment is stored as two arcs with identical weight, so the
//! graph is undirected in effect.  Within a vertex, arcs keep insertion order.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, warn};

use campus_core::{
    Coordinate, EdgeId, EngineConfig, FeatureId, LocatorKind, VertexId, VertexKey,
    DEFAULT_COORDINATE_PRECISION, MAX_COORDINATE_PRECISION,
};

use crate::feature::LineFeature;
use crate::locate::SpatialIndex;

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Immutable road graph in CSR format.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    // ── Vertex data ───────────────────────────────────────────────────────
    /// First-seen coordinate of each vertex.  Indexed by `VertexId`.
    pub vertex_pos: Vec<Coordinate>,

    /// Identity key of each vertex.  Indexed by `VertexId`.
    pub vertex_key: Vec<VertexKey>,

    // ── CSR arc adjacency ─────────────────────────────────────────────────
    /// CSR row pointer.  Length = `vertex_count + 1`.
    pub vertex_out_start: Vec<u32>,

    /// Source vertex of each arc; needed to walk predecessors back to the
    /// route start.
    pub edge_from: Vec<VertexId>,

    /// Destination vertex of each arc.
    pub edge_to: Vec<VertexId>,

    /// Great-circle length of each arc in metres.  Used as the routing cost.
    pub edge_length_m: Vec<f64>,

    /// Source line feature of each arc (diagnostics only).
    pub edge_feature: Vec<FeatureId>,

    /// Source feature identifiers, indexed by `FeatureId`.
    pub feature_tags: Vec<String>,

    precision: u32,
    key_index: FxHashMap<VertexKey, VertexId>,
    pub(crate) spatial_idx: Option<SpatialIndex>,
}

impl RoadNetwork {
    /// Construct an empty network with no vertices or edges.
    ///
    /// Every locate or route call against it returns `None`.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    /// Build a network from a full set of line features in one pass.
    pub fn from_features<'a, I>(features: I, config: &EngineConfig) -> Self
    where
        I: IntoIterator<Item = &'a LineFeature>,
    {
        let mut b = RoadNetworkBuilder::from_config(config);
        b.add_features(features);
        b.build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertex_pos.len()
    }

    /// Number of undirected road segments (half the arc count).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len() / 2
    }

    /// Number of directed arcs.
    pub fn arc_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_pos.is_empty()
    }

    /// Decimal places used for vertex identity.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// `true` if `locate` is served by an R-tree rather than a linear scan.
    pub fn has_spatial_index(&self) -> bool {
        self.spatial_idx.is_some()
    }

    pub fn spatial_index(&self) -> Option<&SpatialIndex> {
        self.spatial_idx.as_ref()
    }

    // ── Vertex lookup ─────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, vertex: VertexId) -> bool {
        vertex.index() < self.vertex_pos.len()
    }

    #[inline]
    pub fn vertex_pos(&self, vertex: VertexId) -> Coordinate {
        self.vertex_pos[vertex.index()]
    }

    pub fn vertex_by_key(&self, key: VertexKey) -> Option<VertexId> {
        self.key_index.get(&key).copied()
    }

    /// The vertex whose identity `coord` rounds to, if any.  Exact identity
    /// match only; use [`locate`](Self::locate) to snap arbitrary points.
    pub fn vertex_at(&self, coord: Coordinate) -> Option<VertexId> {
        self.vertex_by_key(coord.key(self.precision))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing arcs from `vertex`.
    #[inline]
    pub fn out_edges(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.vertex_out_start[vertex.index()] as usize;
        let end   = self.vertex_out_start[vertex.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        let start = self.vertex_out_start[vertex.index()] as usize;
        let end   = self.vertex_out_start[vertex.index() + 1] as usize;
        end - start
    }

    /// Neighbouring vertices of `vertex` paired with the segment length.
    pub fn neighbors(&self, vertex: VertexId) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.out_edges(vertex)
            .map(|e| (self.edge_to[e.index()], self.edge_length_m[e.index()]))
    }

    /// Identifier of the line feature an arc came from.
    pub fn feature_tag(&self, edge: EdgeId) -> &str {
        &self.feature_tags[self.edge_feature[edge.index()].index()]
    }

    /// Canonical `(key, key, length)` list with one entry per segment, the
    /// smaller key first, sorted by key pair.
    ///
    /// Two networks built from the same lines produce equal lists even if
    /// their `VertexId`s were assigned in a different order.
    pub fn weighted_edges(&self) -> Vec<(VertexKey, VertexKey, f64)> {
        let mut out: Vec<_> = (0..self.arc_count())
            .filter_map(|i| {
                let a = self.vertex_key[self.edge_from[i].index()];
                let b = self.vertex_key[self.edge_to[i].index()];
                (a < b).then_some((a, b, self.edge_length_m[i]))
            })
            .collect();
        out.sort_unstable_by_key(|&(a, b, _)| (a, b));
        out
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] from line features, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use campus_core::Coordinate;
/// use campus_spatial::{LineFeature, RoadNetworkBuilder};
///
/// let mut b = RoadNetworkBuilder::new();
/// b.add_feature(&LineFeature::line(
///     "main-road",
///     vec![Coordinate::new(108.900, 34.370), Coordinate::new(108.901, 34.370)],
/// ));
/// let net = b.build();
/// assert_eq!(net.vertex_count(), 2);
/// assert_eq!(net.edge_count(), 1);
/// assert_eq!(net.arc_count(), 2); // both directions
/// ```
pub struct RoadNetworkBuilder {
    precision:     u32,
    locator:       LocatorKind,
    vertices:      Vec<Coordinate>,
    keys:          Vec<VertexKey>,
    key_index:     FxHashMap<VertexKey, VertexId>,
    raw_edges:     Vec<RawEdge>,
    seen_arcs:     FxHashSet<(VertexId, VertexId)>,
    features:      Vec<String>,
    skipped_parts: usize,
}

struct RawEdge {
    from:     VertexId,
    to:       VertexId,
    length_m: f64,
    feature:  FeatureId,
}

impl RoadNetworkBuilder {
    /// Builder with the default precision and a linear-scan locator.
    pub fn new() -> Self {
        Self::with_precision(DEFAULT_COORDINATE_PRECISION)
    }

    /// Builder rounding vertex identity to `precision` decimal places,
    /// clamped to [`MAX_COORDINATE_PRECISION`].
    pub fn with_precision(precision: u32) -> Self {
        if precision > MAX_COORDINATE_PRECISION {
            warn!(precision, max = MAX_COORDINATE_PRECISION, "clamping coordinate precision");
        }
        let precision = precision.min(MAX_COORDINATE_PRECISION);
        Self {
            precision,
            locator:       LocatorKind::LinearScan,
            vertices:      Vec::new(),
            keys:          Vec::new(),
            key_index:     FxHashMap::default(),
            raw_edges:     Vec::new(),
            seen_arcs:     FxHashSet::default(),
            features:      Vec::new(),
            skipped_parts: 0,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_precision(config.coordinate_precision).locator(config.locator)
    }

    /// Choose how the built network answers `locate`.
    pub fn locator(mut self, locator: LocatorKind) -> Self {
        self.locator = locator;
        self
    }

    /// Add every consecutive-pair segment of every part of `feature`.
    ///
    /// Parts with fewer than two coordinates contribute nothing.  Segments
    /// whose endpoints collapse to one vertex are dropped, as are segments
    /// with a non-finite coordinate.
    pub fn add_feature(&mut self, feature: &LineFeature) {
        let tag = self.register_feature(&feature.id);
        for part in feature.geometry.parts() {
            if part.len() < 2 {
                self.skipped_parts += 1;
                debug!(feature = %feature.id, points = part.len(), "skipping degenerate line part");
                continue;
            }
            for pair in part.windows(2) {
                self.add_segment(pair[0], pair[1], tag);
            }
        }
    }

    pub fn add_features<'a, I>(&mut self, features: I)
    where
        I: IntoIterator<Item = &'a LineFeature>,
    {
        for feature in features {
            self.add_feature(feature);
        }
    }

    /// Record a source identifier and return its `FeatureId`.
    pub fn register_feature(&mut self, id: &str) -> FeatureId {
        let fid = FeatureId(self.features.len() as u32);
        self.features.push(id.to_owned());
        fid
    }

    /// Return the vertex for `pos`, creating it if its key is new.
    pub fn ensure_vertex(&mut self, pos: Coordinate) -> VertexId {
        let key = pos.key(self.precision);
        if let Some(&id) = self.key_index.get(&key) {
            return id;
        }
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(pos);
        self.keys.push(key);
        self.key_index.insert(key, id);
        id
    }

    /// Insert the undirected segment `a`–`b` weighted by great-circle length.
    ///
    /// Returns `false` if nothing was added: the endpoints share an identity,
    /// a coordinate is not finite, or both arcs already exist.  A segment
    /// whose endpoints share an identity creates no vertex either.  The first
    /// insertion of an ordered vertex pair wins.
    pub fn add_segment(&mut self, a: Coordinate, b: Coordinate, feature: FeatureId) -> bool {
        if !a.is_finite() || !b.is_finite() {
            debug!(%a, %b, "skipping segment with non-finite coordinate");
            return false;
        }
        if a.key(self.precision) == b.key(self.precision) {
            return false;
        }
        let from = self.ensure_vertex(a);
        let to   = self.ensure_vertex(b);

        let length_m = a.distance_m(b);
        let forward  = self.push_arc(from, to, length_m, feature);
        let backward = self.push_arc(to, from, length_m, feature);
        forward || backward
    }

    fn push_arc(&mut self, from: VertexId, to: VertexId, length_m: f64, feature: FeatureId) -> bool {
        if !self.seen_arcs.insert((from, to)) {
            return false;
        }
        self.raw_edges.push(RawEdge { from, to, length_m, feature });
        true
    }

    pub fn vertex_count(&self) -> usize { self.vertices.len() }
    pub fn arc_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Time complexity: O(E log E) for the arc sort, plus O(V log V) for the
    /// R-tree bulk load when a spatial index was requested.
    pub fn build(self) -> RoadNetwork {
        let vertex_count = self.vertices.len();
        let arc_count    = self.raw_edges.len();

        // Stable sort keeps per-vertex insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:     Vec<VertexId>  = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<VertexId>  = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>       = raw.iter().map(|e| e.length_m).collect();
        let edge_feature:  Vec<FeatureId> = raw.iter().map(|e| e.feature).collect();

        let mut vertex_out_start = vec![0u32; vertex_count + 1];
        for e in &raw {
            vertex_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            vertex_out_start[i] += vertex_out_start[i - 1];
        }
        debug_assert_eq!(vertex_out_start[vertex_count] as usize, arc_count);

        let spatial_idx = match self.locator {
            LocatorKind::SpatialIndex => Some(SpatialIndex::build(&self.vertices)),
            LocatorKind::LinearScan => None,
        };

        info!(
            vertices = vertex_count,
            segments = arc_count / 2,
            features = self.features.len(),
            skipped_parts = self.skipped_parts,
            spatial_index = spatial_idx.is_some(),
            "built road network"
        );

        RoadNetwork {
            vertex_pos: self.vertices,
            vertex_key: self.keys,
            vertex_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_feature,
            feature_tags: self.features,
            precision: self.precision,
            key_index: self.key_index,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
