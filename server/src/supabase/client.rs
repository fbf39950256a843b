//! Supabase HTTP Client

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::error::{SupabaseError, SupabaseResult};
use crate::config::Config;

/// Header carrying the project API key on every Supabase request.
const API_KEY_HEADER: &str = "apikey";

/// Authenticated user resolved from a bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    /// GoTrue user ID.
    pub id: Uuid,
}

/// Client bound to one Supabase project and one credential.
///
/// Carries no session. The configured headers are sent unchanged on every
/// call, so there is nothing to refresh or persist between requests.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    headers: HeaderMap,
}

impl SupabaseClient {
    /// Create a client sending `api_key` and `authorization` with each request.
    pub fn new(
        http: Client,
        base_url: &str,
        api_key: &str,
        mut authorization: HeaderValue,
    ) -> SupabaseResult<Self> {
        let mut api_key = HeaderValue::from_str(api_key)
            .map_err(|_| SupabaseError::InvalidHeader(API_KEY_HEADER))?;
        api_key.set_sensitive(true);
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(AUTHORIZATION, authorization);

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    /// Client acting as the caller, forwarding their `Authorization` header as-is.
    pub fn for_caller(
        http: Client,
        config: &Config,
        authorization: HeaderValue,
    ) -> SupabaseResult<Self> {
        Self::new(
            http,
            &config.supabase_url,
            &config.supabase_anon_key,
            authorization,
        )
    }

    /// Privileged client authenticated with the service-role key.
    pub fn service_role(http: Client, config: &Config) -> SupabaseResult<Self> {
        let key = &config.supabase_service_role_key;
        let authorization = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|_| SupabaseError::InvalidHeader("authorization"))?;
        Self::new(http, &config.supabase_url, key, authorization)
    }

    /// Resolve the user owning the client's bearer token.
    ///
    /// Returns `Ok(None)` when GoTrue answers successfully but the payload
    /// does not describe a user.
    pub async fn get_user(&self) -> SupabaseResult<Option<AuthUser>> {
        let response = self
            .http
            .get(self.url("/auth/v1/user"))
            .headers(self.headers.clone())
            .send()
            .await?;

        let body: Value = error_for_status(response).await?.json().await?;
        Ok(serde_json::from_value(body).ok())
    }

    /// Invoke a Postgres function through PostgREST.
    pub async fn rpc(&self, function: &str, params: &Value) -> SupabaseResult<()> {
        let response = self
            .http
            .post(self.url(&format!("/rest/v1/rpc/{function}")))
            .headers(self.headers.clone())
            .json(params)
            .send()
            .await?;

        error_for_status(response).await?;
        Ok(())
    }

    /// Permanently delete a user through the GoTrue admin API.
    ///
    /// Requires a service-role client.
    pub async fn admin_delete_user(&self, user_id: Uuid) -> SupabaseResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/auth/v1/admin/users/{user_id}")))
            .headers(self.headers.clone())
            .json(&json!({ "should_soft_delete": false }))
            .send()
            .await?;

        error_for_status(response).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Turn a non-success response into [`SupabaseError::Api`].
async fn error_for_status(response: Response) -> SupabaseResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(SupabaseError::Api {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

/// Pick the human-readable message out of a GoTrue or PostgREST error body.
///
/// GoTrue uses `msg` (older versions `error_description`), PostgREST uses
/// `message`. Falls back to the raw body, then to the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["msg", "message", "error_description", "error"] {
            if let Some(message) = json[key].as_str() {
                return message.to_string();
            }
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}
