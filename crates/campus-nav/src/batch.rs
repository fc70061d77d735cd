//! Many independent route queries against one network snapshot.

use campus_core::{Coordinate, EngineConfig};
use campus_spatial::{plan_route, CancelToken, Route, Router};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{NavResult, SharedNetwork};

/// Route every `(start, end)` pair against the same snapshot.
///
/// Results keep the input order.  Each query gets its own timeout from
/// `config`.  With the `parallel` feature the queries run on Rayon's pool.
pub fn route_batch<R: Router>(
    network: &SharedNetwork,
    router: &R,
    pairs: &[(Coordinate, Coordinate)],
    config: &EngineConfig,
) -> Vec<NavResult<Option<Route>>> {
    let snapshot = network.snapshot();
    let limit = config.route_timeout();

    let query = |&(start, end): &(Coordinate, Coordinate)| -> NavResult<Option<Route>> {
        let cancel = CancelToken::from_limit(limit);
        plan_route(&snapshot, router, start, end, &cancel).map_err(Into::into)
    };

    #[cfg(feature = "parallel")]
    let results = pairs.par_iter().map(query).collect();

    #[cfg(not(feature = "parallel"))]
    let results = pairs.iter().map(query).collect();

    results
}
