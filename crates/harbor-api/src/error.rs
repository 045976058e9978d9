use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use harbor_chain::ChainError;
use harbor_crypto::CipherError;
use harbor_db::StoreError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// A `spawn_blocking` task panicked or was cancelled.
    pub fn join(e: tokio::task::JoinError) -> Self {
        error!("blocking task failed: {}", e);
        Self::internal("internal error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AlreadyExists(_) => Self::bad_request(e.to_string()),
            StoreError::NotFound(_) => Self::not_found(e.to_string()),
            StoreError::NotAuthorized(_) => Self::forbidden(e.to_string()),
            StoreError::Validation(_) => Self::bad_request(e.to_string()),
            StoreError::Sqlite(_) | StoreError::Poisoned => {
                error!("store failure: {}", e);
                Self::internal("storage error")
            }
        }
    }
}

impl From<CipherError> for ApiError {
    fn from(e: CipherError) -> Self {
        error!("cipher failure: {}", e);
        Self::internal(format!("error processing message content: {e}"))
    }
}

impl From<ChainError> for ApiError {
    fn from(e: ChainError) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, e.to_string())
    }
}
