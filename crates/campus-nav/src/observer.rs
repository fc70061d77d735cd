//! Session observer trait for pushing route updates to a renderer.

use campus_spatial::Route;

use crate::RouteStatus;

/// Callbacks invoked by [`NavSession`][crate::NavSession] whenever its route
/// changes.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — status line
///
/// ```rust,ignore
/// struct StatusLine;
///
/// impl SessionObserver for StatusLine {
///     fn on_route(&mut self, route: &Route) {
///         println!("{}", campus_core::distance_km_label(route.distance_m));
///     }
///     fn on_no_route(&mut self, status: RouteStatus) {
///         println!("{}", status.message());
///     }
/// }
/// ```
pub trait SessionObserver {
    /// A new route replaced the previous one.
    fn on_route(&mut self, _route: &Route) {}

    /// Both endpoints are set but no route could be produced.
    fn on_no_route(&mut self, _status: RouteStatus) {}

    /// Endpoints and route were cleared.
    fn on_cleared(&mut self) {}
}

/// A [`SessionObserver`] that does nothing.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
