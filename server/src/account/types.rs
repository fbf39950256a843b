//! Account Deletion Response Types

use serde::Serialize;

/// Response after the account has been deleted.
#[derive(Debug, Serialize)]
pub struct DeleteAccountResponse {
    /// Human-readable message.
    pub message: String,
}
