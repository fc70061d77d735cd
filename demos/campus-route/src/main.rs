//! `campus-route`: load a road GeoJSON file and print the shortest route
//! between two coordinates.
//!
//! ```text
//! campus-route roads.geojson --from 108.900,34.370 --to 108.902,34.371
//! campus-route roads.geojson --from 108.900,34.370 --to 108.902,34.371 --geojson
//! RUST_LOG=debug campus-route roads.geojson --config engine.json --from ... --to ...
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use campus_core::{Coordinate, EngineConfig, distance_km_label};
use campus_nav::{RouteStatus, SessionBuilder, SharedNetwork};
use campus_spatial::DijkstraRouter;
use campus_spatial::geojson::load_features;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest walking route over a campus road network")]
struct Cli {
    /// GeoJSON file with LineString / MultiLineString road features.
    roads: PathBuf,

    /// Start point as `lon,lat`.
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    from: Coordinate,

    /// End point as `lon,lat`.
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    to: Coordinate,

    /// JSON engine configuration (coordinate precision, locator, timeout).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the route as a GeoJSON Feature instead of a distance label.
    #[arg(long)]
    geojson: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let features = load_features(&cli.roads)
        .with_context(|| format!("loading roads from {}", cli.roads.display()))?;
    info!(features = features.len(), "road features loaded");

    let network = Arc::new(SharedNetwork::empty());
    network.rebuild(&features, &config)?;

    let mut session = SessionBuilder::new(Arc::clone(&network), DijkstraRouter)
        .config(config)
        .build()?;
    session.set_start(cli.from)?;

    match session.set_end(cli.to)? {
        Some(RouteStatus::Found) => {}
        Some(status) => bail!("{}", status.message()),
        None => bail!("both endpoints are required"),
    }
    let Some(route) = session.route() else {
        bail!("{}", RouteStatus::NoRoute.message());
    };

    if cli.geojson {
        println!("{}", route.to_geojson_string());
    } else {
        let snapshot = network.snapshot();
        println!("{}", distance_km_label(route.distance_m));
        println!("via: {}", route.feature_tags(&snapshot).join(" → "));
    }
    Ok(())
}

fn parse_coordinate(s: &str) -> Result<Coordinate, String> {
    let (lon, lat) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `lon,lat`, got `{s}`"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("bad longitude `{lon}`: {e}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude `{lat}`: {e}"))?;
    let coord = Coordinate::new(lon, lat);
    if !coord.is_finite() {
        return Err(format!("coordinate `{s}` is not finite"));
    }
    Ok(coord)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
