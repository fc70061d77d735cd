//! Cooperative cancellation for route searches.
//!
//! The router polls the token once per settled vertex.  A token can be
//! tripped from another thread via [`CancelToken::cancel`], or expire on its
//! own when built with [`CancelToken::with_timeout`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{SpatialError, SpatialResult};

/// Shared cancellation flag with an optional deadline.
///
/// Clones share the same flag.
#[derive(Clone, Debug)]
pub struct CancelToken {
    flag:     Arc<AtomicBool>,
    deadline: Option<(Instant, Duration)>,
}

impl CancelToken {
    /// A token that only trips when [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        Self { flag: Arc::new(AtomicBool::new(false)), deadline: None }
    }

    /// A token that also trips once `limit` has elapsed from now.
    pub fn with_timeout(limit: Duration) -> Self {
        Self {
            flag:     Arc::new(AtomicBool::new(false)),
            deadline: Some((Instant::now() + limit, limit)),
        }
    }

    /// Build from an optional limit, as read from `EngineConfig`.
    pub fn from_limit(limit: Option<Duration>) -> Self {
        match limit {
            Some(limit) => Self::with_timeout(limit),
            None => Self::new(),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// `Err` if the token was cancelled or its deadline has passed.
    #[inline]
    pub fn check(&self) -> SpatialResult<()> {
        if self.is_cancelled() {
            return Err(SpatialError::Cancelled);
        }
        if let Some((deadline, limit)) = self.deadline {
            if Instant::now() >= deadline {
                return Err(SpatialError::TimedOut { limit_ms: limit.as_millis() as u64 });
            }
        }
        Ok(())
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
