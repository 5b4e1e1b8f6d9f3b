use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use api_types::ErrorBody;
pub use pagination::PaginationSettings;
pub use server::{ServerConfig, app, run_with_listener};

mod pagination;
mod server;
mod transfer;
mod user;

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// Malformed path parameter or request body.
    Generic(String),
    /// A list endpoint matched no rows.
    EmptyPage(String),
    Timeout,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidArgument(_)
        | EngineError::InsufficientFunds(_) => StatusCode::BAD_REQUEST,
        EngineError::Conflict(_) | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn kind_for_engine_error(err: &EngineError) -> &'static str {
    match err {
        EngineError::InvalidAmount(_) | EngineError::InvalidArgument(_) => "invalid_argument",
        EngineError::KeyNotFound(_) => "not_found",
        EngineError::InsufficientFunds(_) => "insufficient_funds",
        EngineError::Conflict(_) => "conflict",
        EngineError::Database(_) => "internal",
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Conflict(reason) => {
            tracing::error!("giving up after repeated conflicts: {reason}");
            "balance changed concurrently, try again".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, error) = match self {
            ServerError::Engine(err) => {
                let status = status_for_engine_error(&err);
                let kind = kind_for_engine_error(&err);
                (status, message_for_engine_error(err), kind)
            }
            ServerError::Generic(message) => (StatusCode::BAD_REQUEST, message, "invalid_argument"),
            ServerError::EmptyPage(message) => (StatusCode::BAD_REQUEST, message, "no_rows"),
            ServerError::Timeout => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "request timed out".to_string(),
                "timeout",
            ),
        };

        let body = ErrorBody {
            status: status.as_u16(),
            message,
            error: error.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
