//! Response types for the shift allocation API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP statuses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            EngineError::InvalidShift { .. } => (StatusCode::BAD_REQUEST, "INVALID_SHIFT"),
            EngineError::InvalidSlot { .. } => (StatusCode::BAD_REQUEST, "INVALID_SLOT"),
            EngineError::TierNotAvailable { .. } => {
                (StatusCode::BAD_REQUEST, "TIER_NOT_AVAILABLE")
            }
            EngineError::RevealQuotaExceeded { .. } => {
                (StatusCode::BAD_REQUEST, "REVEAL_QUOTA_EXCEEDED")
            }
            EngineError::AssignmentConflict { .. } => {
                (StatusCode::CONFLICT, "ASSIGNMENT_CONFLICT")
            }
            EngineError::SingleWorkerConflict { .. } => {
                (StatusCode::BAD_REQUEST, "SINGLE_WORKER_CONFLICT")
            }
            EngineError::SlotNotInShift { .. } => (StatusCode::BAD_REQUEST, "SLOT_NOT_IN_SHIFT"),
            EngineError::NotAnOccurrence { .. } => (StatusCode::BAD_REQUEST, "NOT_AN_OCCURRENCE"),
            EngineError::NotAssignee { .. } => (StatusCode::BAD_REQUEST, "NOT_ASSIGNEE"),
            EngineError::DuplicateLeaveRequest { .. } => {
                (StatusCode::BAD_REQUEST, "DUPLICATE_LEAVE_REQUEST")
            }
            EngineError::RowNotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        };

        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}
