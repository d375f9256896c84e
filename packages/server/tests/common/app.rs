//! In-process API client.
//!
//! Builds the real router over in-memory dependencies and drives it with
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use jobboard_core::domains::auth::{IdentityProfile, JwtService};
use jobboard_core::kernel::TestDependencies;
use jobboard_core::server::{build_app, AppState};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test_secret_key";
pub const TEST_ISSUER: &str = "https://test-tenant.example.com/";
pub const TEST_CLIENT_URL: &str = "http://localhost:3000";
pub const TEST_TRIGGER_TOKEN: &str = "operator-token";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

pub struct TestApp {
    pub deps: TestDependencies,
    pub jwt_service: Arc<JwtService>,
    router: Router,
}

impl TestApp {
    /// App with the manual trigger disabled
    pub fn new() -> Self {
        Self::build(TestDependencies::new(), None)
    }

    /// App with the manual trigger enabled under `TEST_TRIGGER_TOKEN`
    pub fn with_trigger(deps: TestDependencies) -> Self {
        Self::build(deps, Some(TEST_TRIGGER_TOKEN.to_string()))
    }

    fn build(deps: TestDependencies, ingest_trigger_token: Option<String>) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            TEST_JWT_SECRET,
            TEST_ISSUER.to_string(),
            None,
        ));
        let router = build_app(AppState {
            deps: deps.server_deps(),
            jwt_service: jwt_service.clone(),
            client_url: TEST_CLIENT_URL.to_string(),
            ingest_trigger_token,
        });

        Self {
            deps,
            jwt_service,
            router,
        }
    }

    pub fn token_for(&self, profile: &IdentityProfile) -> String {
        self.jwt_service
            .create_token(profile, chrono::Duration::hours(1))
            .expect("Failed to mint test token")
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Option<Value>) -> TestResponse {
        self.request(Method::PUT, uri, Some(token), body).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Trigger ingestion with an optional operator token
    pub async fn fetch_external(&self, operator_token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method(Method::GET)
            .uri("/api/v1/jobs/fetch-external");
        if let Some(token) = operator_token {
            builder = builder.header("x-ingest-token", token);
        }
        self.send(builder.body(Body::empty()).expect("Failed to build request"))
            .await
    }
}
