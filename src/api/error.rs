use thiserror::Error;

/// Errors surfaced by a [`ResourceApi`](super::ResourceApi) call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout).
    #[error("Network error calling {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response other than a 404 on an item path.
    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    /// Rejected before sending, e.g. creating an entity that already has an id.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ApiError {
    /// Short machine-readable kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Network { .. } => "network",
            ApiError::Server { .. } => "server",
            ApiError::NotFound { .. } => "not_found",
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::Decode { .. } => "decode",
            ApiError::Build(_) => "build",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
