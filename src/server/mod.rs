//! HTTP boundary: query parsing, algorithm lookup and GeoJSON output

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{Method, StatusCode, header};
use axum::routing::get;
use axum::{Json, Router};
use log::{debug, info};
use tower_http::cors::{AllowOrigin, CorsLayer, MaxAge};

use crate::cluster::{Algorithm, FeatureCollection};
use crate::error::Result;
use crate::provider::DataProvider;

mod error;
pub mod params;


use params::{DataParams, QueryParams};

/// Read-only state shared by all requests
pub struct AppState {
    pub provider: Arc<dyn DataProvider>,
    /// Clustering radius in pixels, fixed server side
    pub icon_size: f64,
}

impl AppState {
    pub fn new(provider: Arc<dyn DataProvider>, icon_size: f64) -> Self {
        AppState {
            provider,
            icon_size,
        }
    }
}

/// Resolves the algorithm and clusters the requested viewport
pub fn cluster_request(state: &AppState, params: &DataParams) -> Result<FeatureCollection> {
    let algorithm = Algorithm::resolve(&params.algo)?;
    let viewport = params.viewport();

    let centroids = algorithm.cluster(
        state.provider.as_ref(),
        state.icon_size,
        params.zoom,
        viewport.as_ref(),
    )?;

    info!(
        "{algorithm} at zoom {}: {} centroids",
        params.zoom,
        centroids.len()
    );
    Ok(FeatureCollection::new(centroids))
}

async fn get_data(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<DataParams>,
) -> Result<Json<FeatureCollection>> {
    debug!("GET /api/data {params:?}");
    cluster_request(&state, &params).map(Json)
}

async fn list_algorithms() -> Json<Vec<&'static str>> {
    Json(Algorithm::names())
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

fn cors(origins: &str) -> CorsLayer {
    CorsLayer::new()
        .allow_methods(vec![Method::GET])
        .allow_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .allow_origin(AllowOrigin::list(
            origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .filter_map(|o| o.parse().ok()),
        ))
        .max_age(MaxAge::exact(Duration::new(3600, 0)))
}

/// Builds the service router
pub fn router(state: Arc<AppState>, allowed_origins: &str) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/algorithms", get(list_algorithms))
        .route("/api/data", get(get_data))
        .layer(cors(allowed_origins))
        .with_state(state)
}
