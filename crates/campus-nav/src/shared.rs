//! Read-mostly handle to the current road network.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use campus_core::EngineConfig;
use campus_spatial::{LineFeature, RoadNetwork};

use crate::NavResult;

/// The road network currently in use, replaceable as a whole.
///
/// Readers take an `Arc` snapshot and release the lock immediately, so a
/// long route search never blocks a reload and a reload never mutates a
/// graph that a search is reading.
pub struct SharedNetwork {
    current:    RwLock<Arc<RoadNetwork>>,
    generation: AtomicU64,
}

impl SharedNetwork {
    pub fn new(network: RoadNetwork) -> Self {
        Self {
            current:    RwLock::new(Arc::new(network)),
            generation: AtomicU64::new(0),
        }
    }

    /// A handle holding an empty network; routing answers "not ready" until
    /// the first [`rebuild`](Self::rebuild).
    pub fn empty() -> Self {
        Self::new(RoadNetwork::empty())
    }

    /// The network in use right now.
    pub fn snapshot(&self) -> Arc<RoadNetwork> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Swap in `network` and return the one it replaced.
    pub fn replace(&self, network: RoadNetwork) -> Arc<RoadNetwork> {
        self.swap_in(Arc::new(network)).0
    }

    /// Build a fresh network from the full feature set, then swap it in.
    ///
    /// The build runs without holding the lock.  The returned `Arc` is the
    /// network this call built, even if another rebuild has already
    /// replaced it.
    pub fn rebuild<'a, I>(&self, features: I, config: &EngineConfig) -> NavResult<Arc<RoadNetwork>>
    where
        I: IntoIterator<Item = &'a LineFeature>,
    {
        config.validate()?;
        let next = Arc::new(RoadNetwork::from_features(features, config));
        let (_, generation) = self.swap_in(Arc::clone(&next));
        info!(
            vertices = next.vertex_count(),
            segments = next.edge_count(),
            generation,
            "road network swapped in"
        );
        Ok(next)
    }

    /// Install `next` and bump the generation under the write lock.  Returns
    /// the previous network and the generation `next` was installed as.
    fn swap_in(&self, next: Arc<RoadNetwork>) -> (Arc<RoadNetwork>, u64) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        (previous, generation)
    }

    /// Number of swaps since construction.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// `true` once the network has at least one vertex.
    pub fn is_ready(&self) -> bool {
        !self.snapshot().is_empty()
    }
}

impl Default for SharedNetwork {
    fn default() -> Self {
        Self::empty()
    }
}
