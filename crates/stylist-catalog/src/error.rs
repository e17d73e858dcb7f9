use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use stylist_core::HttpError;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors surfaced by the trending styles catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed or incomplete request
    #[error("{0}")]
    InvalidRequest(String),

    /// No valid session on an admin route
    #[error("Authentication required")]
    Unauthorized,

    /// Session lacks an admin role
    #[error("Insufficient permissions")]
    Forbidden,

    /// No record with this id
    #[error("Trending style {0} not found")]
    NotFound(Uuid),

    /// Backing store failure
    #[error("catalog storage error: {0}")]
    Storage(String),
}

impl HttpError for CatalogError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::Unauthorized => "authentication_error",
            Self::Forbidden => "permission_error",
            Self::NotFound(_) => "not_found_error",
            Self::Storage(_) => "api_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Storage(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        if let Self::Storage(reason) = &self {
            tracing::error!(%reason, "catalog storage failure");
        }

        let body = serde_json::json!({ "error": self.client_message() });
        (self.status_code(), Json(body)).into_response()
    }
}
