//! `campus-core` — foundational types for the campus routing engine.
//!
//! This crate is a dependency of every other `campus-*` crate.  It has no
//! `campus-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde` and `serde_json`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `VertexId`, `EdgeId`, `FeatureId`                         |
//! | [`geo`]     | `Coordinate`, `VertexKey`, haversine distance             |
//! | [`config`]  | `EngineConfig`, `LocatorKind`                             |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types and     |
//! |         | `EngineConfig::{from_json, load}`.                         |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    EngineConfig, LocatorKind, DEFAULT_COORDINATE_PRECISION, MAX_COORDINATE_PRECISION,
};
pub use error::{CoreError, CoreResult};
pub use geo::{distance_km_label, Coordinate, VertexKey, EARTH_RADIUS_M};
pub use ids::{EdgeId, FeatureId, VertexId};
