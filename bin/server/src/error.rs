//! Domain error types for milestone operations.
//!
//! Validation failures are reported results carrying per-field messages,
//! never panics or opaque faults. Store failures are surfaced to the client
//! as a generic retry-prompting message; the details stay in the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

use crate::db::StoreError;
use crate::milestones::FieldErrors;

/// Errors from milestone operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MilestoneError {
    /// One or more field constraints were violated.
    ValidationFailed { errors: FieldErrors },
    /// The referenced milestone does not exist.
    NotFound { id: String },
    /// The underlying store operation failed.
    PersistenceFailed { details: String },
}

impl fmt::Display for MilestoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed { errors } => {
                write!(f, "validation failed for {} field(s)", errors.len())
            }
            Self::NotFound { id } => write!(f, "milestone '{id}' not found"),
            Self::PersistenceFailed { details } => {
                write!(f, "persistence failed: {details}")
            }
        }
    }
}

impl std::error::Error for MilestoneError {}

impl From<StoreError> for MilestoneError {
    fn from(e: StoreError) -> Self {
        Self::PersistenceFailed { details: e.details }
    }
}

impl IntoResponse for MilestoneError {
    fn into_response(self) -> Response {
        match self {
            Self::ValidationFailed { errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "success": false,
                    "error": "validation failed",
                    "field_errors": errors,
                })),
            )
                .into_response(),
            Self::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "success": false,
                    "error": "not found",
                })),
            )
                .into_response(),
            Self::PersistenceFailed { details } => {
                tracing::error!(error = %details, "milestone store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": "something went wrong, please try again",
                    })),
                )
                    .into_response()
            }
        }
    }
}
