use std::{error::Error, fmt};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::config::Environment;

/// Failure inside a bookmark store backend. Never handled locally; it rides
/// up to the terminal error handler as an unhandled failure.
#[derive(Debug)]
pub enum StoreError {
    Backend(Box<dyn Error + Send + Sync + 'static>),
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use StoreError::*;
        match self {
            Backend(e) => Some(e.as_ref() as &dyn Error),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use StoreError::*;
        match self {
            Backend(e) => write!(f, "Backend: {}", e),
        }
    }
}

impl From<libsql::Error> for StoreError {
    fn from(error: libsql::Error) -> Self {
        StoreError::Backend(Box::new(error))
    }
}

/// Terminal error handler for failures nothing upstream dealt with.
/// Production responses stay opaque; everything else gets the full chain
/// logged and echoed back for the operator.
#[derive(Debug)]
pub struct AppError {
    env: Environment,
    source: StoreError,
}

impl AppError {
    pub fn new(env: Environment, source: StoreError) -> Self {
        AppError { env, source }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.env.is_production() {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": { "message": "server error" } })),
            )
                .into_response();
        }

        let detail = crate::unpack_error(&self.source);
        tracing::error!("unhandled failure: {}", detail);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": self.source.to_string(), "error": detail })),
        )
            .into_response()
    }
}
