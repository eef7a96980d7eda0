//! Error taxonomy for the service core.
//!
//! Every failure is returned to the immediate caller; nothing is retried or
//! swallowed below the route layer. Unauthenticated access to a guarded route
//! is a redirect, not an error, and never shows up here (see
//! [`crate::auth::guard`]).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// A durable-store operation failed. Both the record store (sqlx) and the
/// session store can raise this; callers treat it as transient.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("datastore query failed: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("session store failed: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    /// The requested record does not exist.
    #[error("not found")]
    NotFound,
    /// The requester is authenticated but does not own the resource (or the
    /// resource is private and owned by someone else).
    #[error("not allowed")]
    Forbidden,
    /// Malformed create/update input, rejected before any persistence.
    #[error("{0}")]
    Validation(&'static str),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<tower_sessions::session::Error> for Error {
    fn from(err: tower_sessions::session::Error) -> Self {
        Error::Storage(StoreError::Session(err))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Storage(err) => {
                tracing::error!("storage failure: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            Error::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            Error::Validation("title is required").into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
