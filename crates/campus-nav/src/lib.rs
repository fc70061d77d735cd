//! `campus-nav` — navigation session on top of a shared road network.
//!
//! The graph is built once and read by many queries.  A reload builds a new
//! graph off to the side and swaps it in; queries already running keep the
//! snapshot they started with.
//!
//! ```text
//! SharedNetwork ──snapshot──► NavSession ──plan_route──► Route ──► SessionObserver
//!      ▲
//!      └── rebuild(features) : build, then swap
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                              |
//! |------------|-----------------------------------------------------|
//! | `parallel` | Runs [`route_batch`] on Rayon's thread pool.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use campus_nav::{SessionBuilder, SharedNetwork};
//! use campus_spatial::DijkstraRouter;
//!
//! let network = Arc::new(SharedNetwork::empty());
//! network.rebuild(&features, &config)?;
//! let mut session = SessionBuilder::new(network, DijkstraRouter).config(config).build()?;
//! session.set_start(start)?;
//! let status = session.set_end(end)?;
//! ```

pub mod batch;
pub mod builder;
pub mod error;
pub mod observer;
pub mod session;
pub mod shared;


pub use batch::route_batch;
pub use builder::SessionBuilder;
pub use error::{NavError, NavResult};
pub use observer::{NoopObserver, SessionObserver};
pub use session::{NavMode, NavSession, RouteStatus};
pub use shared::SharedNetwork;
