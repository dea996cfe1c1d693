//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned for every 500; the cause only goes to the log.
pub const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid database url: {0}")]
    DatabaseUrl(String),
    #[error("invalid ssl mode: {0}")]
    SslMode(String),
    #[error("logging: {0}")]
    Logging(String),
}

/// Failures surfaced by a store implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} with id {id} does not exist")]
    NotFound { entity: &'static str, id: i64 },
    /// Delete by unique id touched more than one row.
    #[error("deleting {entity} {id} affected {affected} rows")]
    Integrity {
        entity: &'static str,
        id: i64,
        affected: u64,
    },
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid {entity} id: {raw}")]
    InvalidId { entity: &'static str, raw: String },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

pub fn error_response(status: StatusCode, code: &str, message: String) -> Response {
    let body = ErrorBody {
        error: ErrorDetail {
            code: code.to_string(),
            message,
        },
    };
    (status, Json(body)).into_response()
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidId { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match status {
            StatusCode::BAD_REQUEST => ("bad_request", self.to_string()),
            StatusCode::NOT_FOUND => ("not_found", self.to_string()),
            _ => {
                tracing::error!(error = %self, "request failed");
                ("internal_error", INTERNAL_MESSAGE.to_string())
            }
        };
        error_response(status, code, message)
    }
}
