use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::repo::RepoError;

/// Failure envelope: `{ "success": false, "error": "..." }`
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

/// Request-level error taxonomy. Every handler failure funnels through
/// here; the HTTP mapping lives in the [`ResponseError`] impl so no
/// handler builds its own error response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed client input. The message names the violated rule and is
    /// returned verbatim in the response body.
    #[error("{0}")]
    Validation(String),

    #[error("Client not found")]
    NotFound,

    #[error("A client with this email already exists")]
    DuplicateEmail,

    /// Unexpected data-layer failure. Logged server-side, genericized in
    /// the response so internals never leak.
    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => ApiError::NotFound,
            RepoError::DuplicateEmail => ApiError::DuplicateEmail,
            RepoError::Database(e) => ApiError::Storage(e),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match self {
            ApiError::Storage(e) => {
                error!("storage error: {e:?}");
                "Internal server error".to_string()
            }
            e => e.to_string(),
        };

        HttpResponse::build(status).json(ErrorBody {
            success: false,
            error: message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::DuplicateEmail.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Storage(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn storage_errors_are_genericized() {
        let resp = ApiError::Storage(sqlx::Error::PoolTimedOut).error_response();
        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["error"], "Internal server error");
    }

    #[actix_web::test]
    async fn validation_message_is_returned_verbatim() {
        let resp = ApiError::Validation("Invalid email format".into()).error_response();
        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["error"], "Invalid email format");
    }
}
