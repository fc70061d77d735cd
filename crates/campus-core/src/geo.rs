//! Geographic coordinate type, vertex identity, and distance utilities.
//!
//! `Coordinate` stores `f64` longitude/latitude in decimal degrees.  Vertex
//! identity is derived by rounding to a fixed number of decimal places (six by
//! default, ~0.1 m at the equator), which is what lets separately digitised
//! road lines that share an endpoint join into one graph.
//!
//! The haversine routine assumes a small extent: no antimeridian or polar
//! special-casing is done.

/// Mean Earth radius in metres used by [`Coordinate::distance_m`].
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 coordinate in decimal degrees, `(lon, lat)` order.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: Coordinate) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Round both axes to `precision` decimal places and return the resulting
    /// vertex identity.
    ///
    /// Two coordinates with the same key are the same graph vertex.  Values
    /// that straddle a rounding boundary do not merge even when they are a
    /// fraction of the unit apart.
    #[inline]
    pub fn key(self, precision: u32) -> VertexKey {
        let scale = 10f64.powi(precision as i32);
        VertexKey {
            lon: (self.lon * scale).round() as i64,
            lat: (self.lat * scale).round() as i64,
        }
    }

    /// Position on the unit sphere.
    ///
    /// Straight-line (chord) distance between two such vectors grows
    /// monotonically with great-circle distance, so a Euclidean nearest
    /// neighbour in this space is also the haversine nearest neighbour.
    pub fn unit_vector(self) -> [f64; 3] {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }

    /// `true` if both components are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Interpret the tuple as `(lon, lat)`.
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

// ── VertexKey ─────────────────────────────────────────────────────────────────

/// Rounded `(lon, lat)` pair in units of `10^-precision` degrees.
///
/// A pure function of the coordinate and the precision; see
/// [`Coordinate::key`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexKey {
    pub lon: i64,
    pub lat: i64,
}

impl std::fmt::Display for VertexKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

/// Format a distance in metres as kilometres with two decimals (`"1.25 km"`).
pub fn distance_km_label(meters: f64) -> String {
    format!("{:.2} km", meters / 1_000.0)
}
