//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for sending requests through the full axum router and
//! `StubSupabase`, an in-process stand-in for the GoTrue and PostgREST APIs
//! that records every call it receives.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{self, HeaderMap, Method, Request, Response, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tower::ServiceExt;
use purge_server::api::{create_router, AppState};
use purge_server::config::Config;

/// ID of the only user known to the stub.
pub const TEST_USER_ID: &str = "6f0c2d4e-8b1a-4c3e-9f27-5d8a1b3c4e6f";

/// Token the stub accepts for [`TEST_USER_ID`].
pub const VALID_TOKEN: &str = "valid-user-token";

// ============================================================================
// Test Server
// ============================================================================

/// A running test server bound to a random port.
pub struct TestServer {
    /// Server address (127.0.0.1:PORT).
    pub addr: SocketAddr,
    /// Base URL for HTTP requests (e.g., `http://127.0.0.1:12345`).
    pub url: String,
    /// Handle to the server task for cleanup.
    _handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self._handle.abort();
    }
}

/// Spawn a real HTTP server on a random port.
pub async fn spawn_test_server(router: Router) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let url = format!("http://{addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    TestServer {
        addr,
        url,
        _handle: handle,
    }
}

// ============================================================================
// Stub Supabase
// ============================================================================

/// How the stub answers the two deletion calls.
#[derive(Debug, Default, Clone)]
pub struct StubBehavior {
    /// Fail `delete_own_data` with this PostgREST message.
    pub rpc_error: Option<String>,
    /// Fail the admin delete with this GoTrue message.
    pub admin_error: Option<String>,
}

#[derive(Default)]
struct StubInner {
    behavior: StubBehavior,
    calls: Mutex<Vec<String>>,
    deleted: AtomicBool,
}

/// In-process Supabase backend serving the endpoints the server calls.
#[derive(Clone)]
pub struct StubSupabase {
    inner: Arc<StubInner>,
}

impl StubSupabase {
    /// Start a stub that lets every call succeed.
    pub async fn start() -> (Self, TestServer) {
        Self::start_with(StubBehavior::default()).await
    }

    /// Start a stub with the given failure behavior.
    pub async fn start_with(behavior: StubBehavior) -> (Self, TestServer) {
        let stub = Self {
            inner: Arc::new(StubInner {
                behavior,
                ..StubInner::default()
            }),
        };

        let router = Router::new()
            .route("/auth/v1/user", get(stub_get_user))
            .route("/rest/v1/rpc/{function}", post(stub_rpc))
            .route("/auth/v1/admin/users/{id}", delete(stub_admin_delete_user))
            .with_state(stub.clone());

        let server = spawn_test_server(router).await;
        (stub, server)
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.inner.calls.lock().unwrap().push(call);
    }

    fn is_service_role(headers: &HeaderMap) -> bool {
        let config = Config::default_for_test();
        let key = config.supabase_service_role_key;
        headers.get("apikey").is_some_and(|v| v == key.as_str())
            && headers
                .get("authorization")
                .is_some_and(|v| v == format!("Bearer {key}").as_str())
    }
}

async fn stub_get_user(State(stub): State<StubSupabase>, headers: HeaderMap) -> impl IntoResponse {
    stub.record("get_user".to_string());

    let anon_key = Config::default_for_test().supabase_anon_key;
    let anon_ok = headers.get("apikey").is_some_and(|v| v == anon_key.as_str());
    let token_ok = headers
        .get("authorization")
        .is_some_and(|v| v == format!("Bearer {VALID_TOKEN}").as_str());

    if !anon_ok {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid API key" })),
        );
    }

    if !token_ok || stub.inner.deleted.load(Ordering::SeqCst) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "code": 403,
                "error_code": "bad_jwt",
                "msg": "invalid JWT: unable to parse or verify signature"
            })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "id": TEST_USER_ID,
            "aud": "authenticated",
            "role": "authenticated",
            "email": "user@example.com"
        })),
    )
}

async fn stub_rpc(
    State(stub): State<StubSupabase>,
    Path(function): Path<String>,
    headers: HeaderMap,
    Json(params): Json<Value>,
) -> Response<Body> {
    let user_id = params["user_id"].as_str().unwrap_or_default();
    stub.record(format!("rpc:{function}:{user_id}"));

    if !StubSupabase::is_service_role(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid API key" })),
        )
            .into_response();
    }

    if let Some(message) = &stub.inner.behavior.rpc_error {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "code": "P0001",
                "details": null,
                "hint": null,
                "message": message
            })),
        )
            .into_response();
    }

    StatusCode::NO_CONTENT.into_response()
}

async fn stub_admin_delete_user(
    State(stub): State<StubSupabase>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response<Body> {
    stub.record(format!("admin_delete_user:{id}"));

    if !StubSupabase::is_service_role(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "code": 401, "msg": "This endpoint requires a valid Bearer token" })),
        )
            .into_response();
    }

    if let Some(message) = &stub.inner.behavior.admin_error {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "code": 500, "error_code": "unexpected_failure", "msg": message })),
        )
            .into_response();
    }

    stub.inner.deleted.store(true, Ordering::SeqCst);
    (StatusCode::OK, Json(json!({}))).into_response()
}

// ============================================================================
// Test App
// ============================================================================

/// A test application wrapping the full axum router.
pub struct TestApp {
    pub router: Router,
    pub config: Arc<Config>,
}

impl TestApp {
    /// Create a test app talking to the Supabase project at `supabase_url`.
    pub fn new(supabase_url: &str) -> Self {
        Self::with_config(Config {
            supabase_url: supabase_url.to_string(),
            ..Config::default_for_test()
        })
    }

    /// Create a test app with a custom config.
    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(config.clone()).expect("Failed to build app state");
        Self {
            router: create_router(state),
            config: Arc::new(config),
        }
    }

    /// Build an HTTP request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// Build a deletion request carrying `Authorization: Bearer {token}`.
    pub fn delete_request(token: &str) -> Request<Body> {
        Self::request(Method::POST, "/delete-user-account")
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_to_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect response body")
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        let preview = String::from_utf8_lossy(&bytes);
        panic!("Failed to parse response as JSON: {e}\nBody: {preview}")
    })
}

/// Collect a response body as UTF-8 text.
pub async fn body_to_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect response body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Response body is not UTF-8")
}
