//! Fluent builder for constructing a [`NavSession`].

use std::sync::Arc;

use campus_core::EngineConfig;
use campus_spatial::Router;

use crate::{NavMode, NavResult, NavSession, NoopObserver, SessionObserver, SharedNetwork};

/// Fluent builder for [`NavSession<R, O>`].
///
/// # Required inputs
///
/// - [`SharedNetwork`] — the network handle, usually shared with the loader
/// - `R: Router` — the routing algorithm (e.g. [`campus_spatial::DijkstraRouter`])
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                  |
/// |-----------------|--------------------------|
/// | `.config(c)`    | `EngineConfig::default()`|
/// | `.observer(o)`  | `NoopObserver`           |
///
/// # Example
///
/// ```rust,ignore
/// let mut session = SessionBuilder::new(network, DijkstraRouter)
///     .config(config)
///     .observer(StatusLine)
///     .build()?;
/// ```
pub struct SessionBuilder<R: Router, O: SessionObserver = NoopObserver> {
    network:  Arc<SharedNetwork>,
    router:   R,
    observer: O,
    config:   Option<EngineConfig>,
}

impl<R: Router> SessionBuilder<R, NoopObserver> {
    pub fn new(network: Arc<SharedNetwork>, router: R) -> Self {
        Self { network, router, observer: NoopObserver, config: None }
    }
}

impl<R: Router, O: SessionObserver> SessionBuilder<R, O> {
    /// Supply the engine configuration (route timeout in particular).
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the observer that receives route updates.
    pub fn observer<O2: SessionObserver>(self, observer: O2) -> SessionBuilder<R, O2> {
        SessionBuilder {
            network: self.network,
            router:  self.router,
            observer,
            config:  self.config,
        }
    }

    /// Validate the configuration and return an idle session with no
    /// endpoints.
    pub fn build(self) -> NavResult<NavSession<R, O>> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(NavSession {
            network:  self.network,
            router:   self.router,
            observer: self.observer,
            config,
            mode:     NavMode::Idle,
            start:    None,
            end:      None,
            route:    None,
            status:   None,
        })
    }
}
