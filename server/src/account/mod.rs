//! Account Deletion Module
//!
//! Self-service deletion of the caller's data and Supabase account.

pub mod deletion;
pub mod error;
pub mod handlers;
pub mod types;

use axum::routing::{post, MethodRouter};
use axum::Router;

use crate::api::AppState;

pub use error::DeletionError;

/// Path the deletion endpoint is mounted at, named after the function it replaces.
pub const DELETE_ACCOUNT_PATH: &str = "/delete-user-account";

/// Create the account deletion router.
///
/// Routes:
/// - OPTIONS / and /delete-user-account - CORS preflight
/// - POST / and /delete-user-account - Delete the caller's data and account
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", endpoint())
        .route(DELETE_ACCOUNT_PATH, endpoint())
}

fn endpoint() -> MethodRouter<AppState> {
    post(handlers::delete_account).options(handlers::preflight)
}
