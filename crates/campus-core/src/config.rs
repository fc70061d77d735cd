//! Engine configuration.

use std::time::Duration;

use crate::{CoreError, CoreResult};

/// Decimal places used to derive vertex identity from a coordinate.
pub const DEFAULT_COORDINATE_PRECISION: u32 = 6;

/// Largest precision accepted by [`EngineConfig::validate`].  Beyond nine
/// places an `f64` degree value no longer carries meaningful digits.
pub const MAX_COORDINATE_PRECISION: u32 = 9;

/// Strategy used to snap a query coordinate to its nearest vertex.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LocatorKind {
    /// Exhaustive haversine scan over all vertices.
    #[default]
    LinearScan,
    /// R-tree over unit-sphere positions, built once with the graph.
    SpatialIndex,
}

/// Top-level engine configuration.
///
/// Typically loaded from a JSON file by the application and passed to the
/// graph builder and navigation session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Decimal places for the vertex-identity rounding rule.  Default: 6.
    pub coordinate_precision: u32,

    /// Nearest-vertex strategy.  Default: linear scan.
    pub locator: LocatorKind,

    /// Abort a shortest-path search that runs longer than this.  `None`
    /// means no limit.
    pub route_timeout_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            coordinate_precision: DEFAULT_COORDINATE_PRECISION,
            locator: LocatorKind::LinearScan,
            route_timeout_ms: None,
        }
    }
}

impl EngineConfig {
    /// Reject values the engine cannot honour.
    pub fn validate(&self) -> CoreResult<()> {
        if self.coordinate_precision > MAX_COORDINATE_PRECISION {
            return Err(CoreError::Config(format!(
                "coordinate_precision {} exceeds maximum of {}",
                self.coordinate_precision, MAX_COORDINATE_PRECISION
            )));
        }
        if self.route_timeout_ms == Some(0) {
            return Err(CoreError::Config(
                "route_timeout_ms must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    /// The route timeout as a `Duration`, if any.
    #[inline]
    pub fn route_timeout(&self) -> Option<Duration> {
        self.route_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(feature = "serde")]
impl EngineConfig {
    /// Parse a JSON configuration document and validate it.  Missing fields
    /// take their defaults.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| CoreError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: &std::path::Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
