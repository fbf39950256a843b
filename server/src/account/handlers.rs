//! Account Deletion HTTP Handlers

use axum::extract::State;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    AUTHORIZATION,
};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

use super::deletion;
use super::error::DeletionError;
use super::types::DeleteAccountResponse;
use crate::api::AppState;

/// Headers browsers may send on the actual deletion request.
const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Answer a CORS preflight.
///
/// Static reply; no Supabase calls are made.
pub async fn preflight() -> impl IntoResponse {
    (
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_METHODS, "POST"),
            (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
        ],
        "ok",
    )
}

/// Delete the caller's data, then their account.
///
/// The caller is identified by forwarding their `Authorization` header to
/// GoTrue. Both deletions use the service-role key and are attempted once.
pub async fn delete_account(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, DeletionError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .filter(|value| !value.is_empty())
        .cloned()
        .ok_or(DeletionError::MissingAuthHeader)?;

    let user = deletion::resolve_caller(&state, authorization).await?;
    tracing::info!(user_id = %user.id, "Account deletion requested");

    let admin = deletion::admin_client(&state)?;
    deletion::delete_user_data(&admin, &user).await?;
    deletion::delete_user_account(&admin, &user).await?;

    tracing::info!(user_id = %user.id, "Account deleted");

    Ok((
        [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(DeleteAccountResponse {
            message: "Account deleted successfully".to_string(),
        }),
    ))
}
