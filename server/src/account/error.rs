//! Account Deletion Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Terminal failures of the deletion pipeline.
///
/// `Display` gives the `error` field of the JSON body; the wrapped string,
/// when present, becomes `details`.
#[derive(Debug, thiserror::Error)]
pub enum DeletionError {
    #[error("Missing authorization header")]
    MissingAuthHeader,

    #[error("User not authenticated")]
    NotAuthenticated,

    #[error("Failed to delete user data")]
    DataDeletion(String),

    #[error("Failed to delete user account")]
    AccountDeletion(String),

    #[error("Internal server error")]
    Internal(String),
}

impl DeletionError {
    /// Downstream message attached to the response, if any.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::MissingAuthHeader | Self::NotAuthenticated => None,
            Self::DataDeletion(details)
            | Self::AccountDeletion(details)
            | Self::Internal(details) => Some(details.as_str()),
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingAuthHeader | Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::DataDeletion(_) | Self::AccountDeletion(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for DeletionError {
    fn into_response(self) -> Response {
        if let Self::Internal(details) = &self {
            tracing::error!(error = %details, "Unexpected error during account deletion");
        }

        let body = match self.details() {
            Some(details) => json!({ "error": self.to_string(), "details": details }),
            None => json!({ "error": self.to_string() }),
        };

        (self.status(), Json(body)).into_response()
    }
}
