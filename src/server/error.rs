use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::model::SalesId;

/// Request errors returned by the reference server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("sales {id} not found")]
    NotFound { id: SalesId },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::NotFound { .. } => "not_found",
            ServerError::InvalidRequest(_) => "invalid_request",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
            }
        });
        (self.status_code(), Json(body)).into_response()
    }
}
