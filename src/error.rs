//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Per-field validation messages, keyed by field name.
pub type FieldErrorMap = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("the requested resource could not be found")]
    NotFound,
    #[error("unable to update the record due to an edit conflict, please try again")]
    EditConflict,
    #[error("validation failed")]
    Validation(FieldErrorMap),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("database query timed out")]
    Timeout,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Message used for storage faults so driver internals never reach clients.
const OPAQUE_MESSAGE: &str = "the server encountered a problem and could not process your request";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string(), None),
            AppError::EditConflict => (StatusCode::CONFLICT, "edit_conflict", self.to_string(), None),
            AppError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                self.to_string(),
                serde_json::to_value(fields).ok(),
            ),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", self.to_string(), None),
            AppError::Timeout => {
                tracing::error!("query timed out");
                (StatusCode::INTERNAL_SERVER_ERROR, "timeout", OPAQUE_MESSAGE.into(), None)
            }
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", OPAQUE_MESSAGE.into(), None)
            }
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}
