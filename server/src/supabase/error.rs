//! Supabase Error Types

use thiserror::Error;

/// Errors returned by Supabase calls.
///
/// The `Display` output is the message forwarded to callers as `details`.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// Request could not be built, sent, or its body read.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Supabase answered with a non-success status.
    #[error("{message}")]
    Api {
        /// HTTP status returned by Supabase.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },

    /// A key or credential cannot be sent as an HTTP header.
    #[error("Invalid {0} header value")]
    InvalidHeader(&'static str),
}

impl SupabaseError {
    /// HTTP status returned by Supabase, if the request got that far.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for Supabase calls.
pub type SupabaseResult<T> = Result<T, SupabaseError>;
