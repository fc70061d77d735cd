//! Start/end picks and the route between them.

use std::sync::Arc;

use tracing::{debug, warn};

use campus_core::{Coordinate, EngineConfig};
use campus_spatial::{plan_route, CancelToken, Route, Router};

use crate::{NavResult, SessionObserver, SharedNetwork};

/// Which endpoint the next [`NavSession::pick`] sets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum NavMode {
    #[default]
    Idle,
    SelectStart,
    SelectEnd,
}

/// Outcome of the latest routing attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RouteStatus {
    /// The shared network has no vertices yet.
    NetworkNotReady,
    /// Both endpoints snapped, but they are not connected.
    NoRoute,
    Found,
}

impl RouteStatus {
    /// Short user-facing description.
    pub fn message(self) -> &'static str {
        match self {
            RouteStatus::NetworkNotReady => "network not ready",
            RouteStatus::NoRoute => "no route found",
            RouteStatus::Found => "route found",
        }
    }
}

/// Owned navigation state for one user.
///
/// Setting either endpoint discards the current route and, once both are
/// present, computes a new one against a fresh network snapshot.  Routes are
/// never cached across endpoint changes.
///
/// Create via [`SessionBuilder`][crate::SessionBuilder].
pub struct NavSession<R: Router, O: SessionObserver> {
    pub(crate) network:  Arc<SharedNetwork>,
    pub(crate) router:   R,
    pub(crate) observer: O,
    pub(crate) config:   EngineConfig,
    pub(crate) mode:     NavMode,
    pub(crate) start:    Option<Coordinate>,
    pub(crate) end:      Option<Coordinate>,
    pub(crate) route:    Option<Route>,
    pub(crate) status:   Option<RouteStatus>,
}

impl<R: Router, O: SessionObserver> NavSession<R, O> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn mode(&self) -> NavMode { self.mode }
    pub fn start(&self) -> Option<Coordinate> { self.start }
    pub fn end(&self) -> Option<Coordinate> { self.end }
    pub fn route(&self) -> Option<&Route> { self.route.as_ref() }
    pub fn status(&self) -> Option<RouteStatus> { self.status }
    pub fn config(&self) -> &EngineConfig { &self.config }
    pub fn network(&self) -> &Arc<SharedNetwork> { &self.network }
    pub fn observer(&self) -> &O { &self.observer }
    pub fn observer_mut(&mut self) -> &mut O { &mut self.observer }

    // ── Endpoint updates ──────────────────────────────────────────────────

    /// Arm the next [`pick`](Self::pick).
    pub fn set_mode(&mut self, mode: NavMode) {
        self.mode = mode;
    }

    /// Set the start point.  Returns the new status if a route was attempted,
    /// or `None` while the end point is still missing.
    pub fn set_start(&mut self, coord: Coordinate) -> NavResult<Option<RouteStatus>> {
        self.start = Some(coord);
        self.mode = NavMode::Idle;
        self.recompute()
    }

    /// Set the end point.  See [`set_start`](Self::set_start).
    pub fn set_end(&mut self, coord: Coordinate) -> NavResult<Option<RouteStatus>> {
        self.end = Some(coord);
        self.mode = NavMode::Idle;
        self.recompute()
    }

    /// Apply a map pick to whichever endpoint the current mode selects.
    ///
    /// In [`NavMode::Idle`] the pick is not a navigation input and is ignored.
    pub fn pick(&mut self, coord: Coordinate) -> NavResult<Option<RouteStatus>> {
        match self.mode {
            NavMode::SelectStart => self.set_start(coord),
            NavMode::SelectEnd => self.set_end(coord),
            NavMode::Idle => Ok(None),
        }
    }

    /// Drop both endpoints and the route.
    pub fn clear(&mut self) {
        self.mode = NavMode::Idle;
        self.start = None;
        self.end = None;
        self.route = None;
        self.status = None;
        self.observer.on_cleared();
    }

    /// Recompute the route for the current endpoints, e.g. after the shared
    /// network was rebuilt.
    pub fn refresh(&mut self) -> NavResult<Option<RouteStatus>> {
        self.recompute()
    }

    fn recompute(&mut self) -> NavResult<Option<RouteStatus>> {
        self.route = None;
        self.status = None;

        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Ok(None);
        };

        let network = self.network.snapshot();
        if network.is_empty() {
            warn!("route requested before the road network was loaded");
            return Ok(Some(self.finish_without_route(RouteStatus::NetworkNotReady)));
        }

        let cancel = CancelToken::from_limit(self.config.route_timeout());
        match plan_route(&network, &self.router, start, end, &cancel)? {
            Some(route) => {
                debug!(
                    %start,
                    %end,
                    vertices = route.len(),
                    distance_m = route.distance_m,
                    "route computed"
                );
                self.observer.on_route(&route);
                self.route = Some(route);
                self.status = Some(RouteStatus::Found);
                Ok(self.status)
            }
            None => Ok(Some(self.finish_without_route(RouteStatus::NoRoute))),
        }
    }

    fn finish_without_route(&mut self, status: RouteStatus) -> RouteStatus {
        self.status = Some(status);
        self.observer.on_no_route(status);
        status
    }
}
