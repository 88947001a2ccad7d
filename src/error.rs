use thiserror::Error;

/// Errors returned by the clustering core, the point store and the server.
#[derive(Debug, Error)]
pub enum Error {
    /// No clustering algorithm is registered under the requested name.
    #[error("unknown clustering algorithm: {0}")]
    UnknownAlgorithm(String),

    /// The algorithm needs a viewport but none (or only part of one) was given.
    #[error("algorithm {0} requires a viewport (ne_lng, ne_lat, sw_lng, sw_lat)")]
    MissingViewport(&'static str),

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: String,
    },

    /// A coordinate projects to a non-finite pixel position at the given zoom.
    #[error("coordinate ({lng}, {lat}) has no finite pixel position at zoom {zoom}")]
    NonFiniteProjection { lng: f64, lat: f64, zoom: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Whether the error was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownAlgorithm(_)
                | Error::MissingViewport(_)
                | Error::InvalidParameter { .. }
                | Error::NonFiniteProjection { .. }
        )
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
