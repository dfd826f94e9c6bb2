//! HTTP handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use gigbook_common::{Error, WriteFailure};

pub mod artists;
mod health;
pub mod shows;
mod ui;
pub mod venues;

pub use health::health_routes;
pub use ui::serve_index;

/// Error responses shared by all handlers
#[derive(Debug)]
pub enum ApiError {
    /// Entity lookup miss -> 404
    NotFound(String),
    /// Bad request parameter or body -> 400
    InvalidInput(String),
    /// Delete blocked by remaining references -> 409
    Conflict(String),
    /// Anything else -> 500
    Internal(String),
}

impl ApiError {
    pub fn not_found(entity: &str, id: i64) -> Self {
        ApiError::NotFound(format!("{entity} {id} not found"))
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::InvalidInput(msg) => ApiError::InvalidInput(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// 303 redirect carrying a flash message as a query parameter.
///
/// There is no session layer, so the message travels in the URL the
/// redirected-to page can read it from.
pub(crate) fn redirect_with_flash(path: &str, flash: &str) -> Response {
    let sep = if path.contains('?') { '&' } else { '?' };
    let target = format!("{path}{sep}flash={}", urlencoding::encode(flash));
    Redirect::to(&target).into_response()
}

/// Log a classified write failure; the user only sees a generic message.
pub(crate) fn log_write_failure(action: &str, err: &Error) {
    if let Error::Database(db_err) = err {
        error!(
            "{action} failed ({:?}): {db_err}",
            WriteFailure::classify(db_err)
        );
    } else {
        error!("{action} failed: {err}");
    }
}

/// True when the write failed on a database constraint
pub(crate) fn is_constraint_failure(err: &Error) -> bool {
    matches!(err, Error::Database(db_err)
        if WriteFailure::classify(db_err) == WriteFailure::Constraint)
}
