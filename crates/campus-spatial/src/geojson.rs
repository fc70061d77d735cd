//! GeoJSON road ingest and route export (the `geojson` feature).
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use campus_spatial::geojson::load_features;
//!
//! let roads = load_features(Path::new("roads.geojson"))?;
//! ```
//!
//! # What is loaded
//!
//! `LineString` and `MultiLineString` features only.  Polygons, points and
//! features without geometry are skipped.  A position with fewer than two
//! components is dropped from its line.  The road id comes from the `id`
//! property; a missing, `null`, `false`, empty or zero id becomes
//! [`UNKNOWN_FEATURE_ID`].

use std::fs;
use std::path::Path;

use ::geojson::{Feature, GeoJson, Geometry, JsonObject, JsonValue, Value};
use serde_json::json;
use tracing::{debug, info};

use campus_core::Coordinate;

use crate::feature::{Attributes, LineFeature, LineGeometry, UNKNOWN_FEATURE_ID};
use crate::router::Route;
use crate::{SpatialError, SpatialResult};

// ── Ingest ────────────────────────────────────────────────────────────────────

/// Read and parse a GeoJSON file into line features.
///
/// # Errors
///
/// [`SpatialError::Io`] on file errors, [`SpatialError::GeoJson`] if the text
/// is not valid GeoJSON.
pub fn load_features(path: &Path) -> SpatialResult<Vec<LineFeature>> {
    debug!(path = %path.display(), "loading road GeoJSON");
    let text = fs::read_to_string(path)?;
    parse_features(&text)
}

/// Parse GeoJSON text (a `FeatureCollection`, a single `Feature`, or a bare
/// geometry) into line features.
pub fn parse_features(text: &str) -> SpatialResult<Vec<LineFeature>> {
    let doc: GeoJson = text
        .parse()
        .map_err(|e: ::geojson::Error| SpatialError::GeoJson(e.to_string()))?;

    let features = match doc {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(g) => vec![Feature {
            bbox:            None,
            geometry:        Some(g),
            id:              None,
            properties:      None,
            foreign_members: None,
        }],
    };

    let total = features.len();
    let lines: Vec<LineFeature> = features.iter().filter_map(to_line_feature).collect();
    info!(lines = lines.len(), ignored = total - lines.len(), "parsed road features");
    Ok(lines)
}

fn to_line_feature(feature: &Feature) -> Option<LineFeature> {
    let geometry = match &feature.geometry.as_ref()?.value {
        Value::LineString(line) => LineGeometry::Line(positions(line)),
        Value::MultiLineString(parts) => {
            LineGeometry::MultiLine(parts.iter().map(|p| positions(p)).collect())
        }
        _ => return None,
    };

    let properties = feature.properties.as_ref();
    let id = properties
        .and_then(|p| p.get("id"))
        .and_then(id_string)
        .unwrap_or_else(|| UNKNOWN_FEATURE_ID.to_string());
    let attributes: Attributes = properties
        .map(|p| p.iter().map(|(k, v)| (k.clone(), attribute_string(v))).collect())
        .unwrap_or_default();

    Some(LineFeature { id, geometry, attributes })
}

fn positions(line: &[Vec<f64>]) -> Vec<Coordinate> {
    line.iter()
        .filter(|p| p.len() >= 2)
        .map(|p| Coordinate::new(p[0], p[1]))
        .collect()
}

/// Road id from any truthy JSON value.  `null`, `false`, `0` and `""` mean
/// no id.  Arrays and objects keep their JSON text.
fn id_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null | JsonValue::Bool(false) => None,
        JsonValue::String(s) if s.is_empty() => None,
        JsonValue::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(attribute_string(other)),
    }
}

fn attribute_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── Export ────────────────────────────────────────────────────────────────────

impl Route {
    /// The route as a `LineString` feature with distance properties, ready
    /// for a map renderer.
    pub fn to_geojson(&self) -> Feature {
        let line = self.coordinates.iter().map(|c| vec![c.lon, c.lat]).collect();

        let mut properties = JsonObject::new();
        properties.insert("distance_m".to_string(), json!(self.distance_m));
        properties.insert("distance_km".to_string(), json!(self.distance_km()));
        properties.insert("vertex_count".to_string(), json!(self.len()));

        Feature {
            bbox:            None,
            geometry:        Some(Geometry::new(Value::LineString(line))),
            id:              None,
            properties:      Some(properties),
            foreign_members: None,
        }
    }

    pub fn to_geojson_string(&self) -> String {
        GeoJson::Feature(self.to_geojson()).to_string()
    }
}
