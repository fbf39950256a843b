//! Account Deletion Pipeline
//!
//! Each step performs exactly one Supabase call and maps its failure to a
//! [`DeletionError`]. Steps run in order; data is removed before the account
//! it belongs to. Nothing is rolled back if the account step fails.

use axum::http::HeaderValue;
use serde_json::json;

use super::error::DeletionError;
use crate::api::AppState;
use crate::supabase::{AuthUser, SupabaseClient};

/// Postgres function that removes every row owned by a user.
pub const DELETE_OWN_DATA_RPC: &str = "delete_own_data";

/// Resolve the caller behind `authorization` using a caller-scoped client.
pub async fn resolve_caller(
    state: &AppState,
    authorization: HeaderValue,
) -> Result<AuthUser, DeletionError> {
    let client = SupabaseClient::for_caller(state.http.clone(), &state.config, authorization)
        .map_err(|e| DeletionError::Internal(e.to_string()))?;

    match client.get_user().await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => {
            tracing::warn!("Identity lookup returned no user");
            Err(DeletionError::NotAuthenticated)
        }
        Err(e) => {
            tracing::warn!(error = %e, status = ?e.status(), "Identity lookup failed");
            Err(DeletionError::NotAuthenticated)
        }
    }
}

/// Build the privileged client used for both deletions.
pub fn admin_client(state: &AppState) -> Result<SupabaseClient, DeletionError> {
    SupabaseClient::service_role(state.http.clone(), &state.config)
        .map_err(|e| DeletionError::Internal(e.to_string()))
}

/// Delete every data row owned by `user`.
pub async fn delete_user_data(
    admin: &SupabaseClient,
    user: &AuthUser,
) -> Result<(), DeletionError> {
    admin
        .rpc(DELETE_OWN_DATA_RPC, &json!({ "user_id": user.id }))
        .await
        .map_err(|e| {
            tracing::error!(user_id = %user.id, error = %e, "Error deleting user data");
            DeletionError::DataDeletion(e.to_string())
        })
}

/// Delete the identity record of `user`.
pub async fn delete_user_account(
    admin: &SupabaseClient,
    user: &AuthUser,
) -> Result<(), DeletionError> {
    admin.admin_delete_user(user.id).await.map_err(|e| {
        tracing::error!(user_id = %user.id, error = %e, "Error deleting user account");
        DeletionError::AccountDeletion(e.to_string())
    })
}
