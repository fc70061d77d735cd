//! `campus-spatial` — road graph, nearest-vertex snapping, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`feature`] | `LineFeature`, `LineGeometry` (single vs. multi-part lines)  |
//! | [`network`] | `RoadNetwork` (CSR + optional R-tree), `RoadNetworkBuilder`  |
//! | [`locate`]  | Nearest-vertex lookup, `SpatialIndex`                        |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`, `plan_route`      |
//! | [`cancel`]  | `CancelToken` for cooperative cancellation and timeouts      |
//! | [`geojson`] | GeoJSON ingest and route export (feature = `"geojson"` only) |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Data flow
//!
//! ```text
//! LineFeature* ──► RoadNetworkBuilder ──► RoadNetwork ──► locate ×2 ──► DijkstraRouter ──► Route
//! ```
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `geojson` | Enables GeoJSON loading and `Route::to_geojson`.           |
//! | `serde`   | Derives `Serialize`/`Deserialize` on core types.           |

pub mod cancel;
pub mod error;
pub mod feature;
pub mod locate;
pub mod network;
pub mod router;

#[cfg(feature = "geojson")]
pub mod geojson;

#[cfg(test)]
mod tests;

pub use cancel::CancelToken;
pub use error::{SpatialError, SpatialResult};
pub use feature::{Attributes, LineFeature, LineGeometry, UNKNOWN_FEATURE_ID};
pub use locate::SpatialIndex;
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use router::{plan_route, shortest_path, DijkstraRouter, Route, Router};
