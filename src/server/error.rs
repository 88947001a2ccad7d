use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use serde_json::json;

use crate::error::Error;

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::UnknownAlgorithm(_) => StatusCode::NOT_FOUND,
            Error::MissingViewport(_)
            | Error::InvalidParameter { .. }
            | Error::NonFiniteProjection { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            warn!("Rejected request: {self}");
        } else {
            error!("Request failed: {self}");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}
