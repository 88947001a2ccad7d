use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_qs::Config;

use crate::cluster::Viewport;

// Extractor for `serde_qs` support
pub struct QueryParams<T>(pub T);

impl<B, T> FromRequestParts<B> for QueryParams<T>
where
    B: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _: &B) -> Result<Self, Self::Rejection> {
        let query = parts
            .uri
            .query()
            .ok_or_else(|| (StatusCode::BAD_REQUEST, "Missing query string".to_string()))?;

        let params = parse_query(query)?;
        Ok(QueryParams(params))
    }
}

pub(crate) fn parse_query<T: DeserializeOwned>(query: &str) -> Result<T, (StatusCode, String)> {
    let config = Config::new(5, false);
    config.deserialize_str(query).map_err(|err| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to deserialize query string: {}", err),
        )
    })
}

/// Query parameters of `GET /api/data`
#[derive(Debug, Clone, Deserialize)]
pub struct DataParams {
    pub algo: String,
    pub zoom: f64,
    pub ne_lng: Option<f64>,
    pub ne_lat: Option<f64>,
    pub sw_lng: Option<f64>,
    pub sw_lat: Option<f64>,
}

impl DataParams {
    /// The viewport, when all four corner values were supplied
    pub fn viewport(&self) -> Option<Viewport> {
        Viewport::from_parts(self.ne_lng, self.ne_lat, self.sw_lng, self.sw_lat)
    }
}
