//! Raw line geometry fed to the graph builder.
//!
//! Road files carry untyped attribute bags.  Here the geometry is a closed set
//! of kinds and the attributes ride along as opaque strings; the routing core
//! never reads them.

use std::collections::BTreeMap;

use campus_core::Coordinate;

/// Identifier recorded for features that carry no usable `id` attribute.
pub const UNKNOWN_FEATURE_ID: &str = "unknown";

/// Opaque per-feature attributes, carried for diagnostics and display only.
pub type Attributes = BTreeMap<String, String>;

/// Geometry of a road feature.
#[derive(Clone, Debug, PartialEq)]
pub enum LineGeometry {
    /// One polyline.
    Line(Vec<Coordinate>),
    /// Several polylines under one feature.  Parts are not joined to each
    /// other except where their vertices coincide.
    MultiLine(Vec<Vec<Coordinate>>),
}

impl LineGeometry {
    /// Component polylines, one slice per part.
    pub fn parts(&self) -> &[Vec<Coordinate>] {
        match self {
            LineGeometry::Line(line) => std::slice::from_ref(line),
            LineGeometry::MultiLine(parts) => parts,
        }
    }

    /// Total number of coordinates across all parts.
    pub fn coordinate_count(&self) -> usize {
        self.parts().iter().map(Vec::len).sum()
    }
}

/// A tagged road line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineFeature {
    /// Source identifier, copied onto every edge the feature produces.
    pub id: String,
    pub geometry: LineGeometry,
    pub attributes: Attributes,
}

impl LineFeature {
    /// Single-part line feature with no attributes.
    pub fn line(id: impl Into<String>, coords: Vec<Coordinate>) -> Self {
        Self {
            id: id.into(),
            geometry: LineGeometry::Line(coords),
            attributes: Attributes::new(),
        }
    }

    /// Multi-part line feature with no attributes.
    pub fn multi_line(id: impl Into<String>, parts: Vec<Vec<Coordinate>>) -> Self {
        Self {
            id: id.into(),
            geometry: LineGeometry::MultiLine(parts),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
