//! Map marker clustering service
//!
//! Loads a static point file once, then serves `GET /api/data`, which
//! clusters the points inside a viewport for one zoom level and returns the
//! centroids as a GeoJSON FeatureCollection.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;
use log::{LevelFilter, info, warn};

mod cluster;
mod error;
mod provider;
mod server;


use provider::StaticPointStore;
use server::AppState;

/// Marker size in pixels used as clustering radius
const DEFAULT_ICON_SIZE: f64 = 20.0;

#[derive(Parser, Debug)]
#[command(name = "map_clustering_server")]
#[command(about = "Map marker clustering service", long_about = None)]
struct Args {
    /// Point file: GeoJSON FeatureCollection, or CSV with latitude,longitude[,id]
    #[arg(short, long, env = "MAP_DATA", default_value = "data/points.json")]
    data: PathBuf,

    /// Address to listen on
    #[arg(long, env = "APP_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "APP_PORT", default_value_t = 5000)]
    port: u16,

    /// Clustering radius (marker size) in pixels
    #[arg(short, long, env = "ICON_SIZE", default_value_t = DEFAULT_ICON_SIZE)]
    icon_size: f64,

    /// Comma separated list of origins allowed by CORS
    #[arg(long, env = "ALLOWED_ORIGINS", default_value = "")]
    allowed_origins: String,

    /// Enable debug output
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn validate(&self) -> Result<(), String> {
        if !self.icon_size.is_finite() || self.icon_size <= 0.0 {
            return Err(format!("icon size must be positive, got {}", self.icon_size));
        }
        cluster::grid_dimensions(self.icon_size).map_err(|err| err.to_string())?;
        Ok(())
    }
}

fn init_logger(debug: bool) {
    let default = if debug { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(default)
        .parse_default_env()
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing `.env` file is fine, every option has a default
    let env_loaded = dotenv().is_ok();

    let args = Args::parse();
    init_logger(args.debug);
    if !env_loaded {
        info!("No .env file found, using command line and environment only");
    }
    args.validate()?;

    let store = StaticPointStore::load(&args.data)?;
    if store.is_empty() {
        warn!("No points found in {:?}", args.data);
    }

    let state = Arc::new(AppState::new(Arc::new(store), args.icon_size));
    let app = server::router(state, &args.allowed_origins);

    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
    let addr = listener.local_addr()?;
    info!(
        "Serving clusters on http://{addr} (icon size {}px)",
        args.icon_size
    );

    axum::serve(listener, app).await?;

    info!("Terminating server.");
    Ok(())
}
