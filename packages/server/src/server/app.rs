//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method,
    },
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    apply_job_handler, create_job_handler, delete_job_handler, fetch_external_jobs_handler,
    get_job_handler, health_handler, jobs_by_user_handler, like_job_handler, list_jobs_handler,
    root_handler, search_jobs_handler, update_job_handler, INGEST_TOKEN_HEADER,
};

/// Upper bound for a single request, ingestion trigger included
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
    pub jwt_service: Arc<JwtService>,
    /// Web client origin; CORS allow-origin and post-login redirect target
    pub client_url: String,
    /// Operator token for the manual ingestion trigger; `None` disables it
    pub ingest_trigger_token: Option<String>,
}

/// Routes under `/api/v1`.
///
/// Static segments (`search`, `user`, `apply`, `like`, `fetch-external`) win
/// over `/jobs/:id`.
fn api_routes() -> Router {
    Router::new()
        .route("/jobs", post(create_job_handler).get(list_jobs_handler))
        .route("/jobs/search", get(search_jobs_handler))
        .route("/jobs/fetch-external", get(fetch_external_jobs_handler))
        .route("/jobs/user/:id", get(jobs_by_user_handler))
        .route("/jobs/apply/:id", put(apply_job_handler))
        .route("/jobs/like/:id", put(like_job_handler))
        .route(
            "/jobs/:id",
            get(get_job_handler)
                .put(update_job_handler)
                .delete(delete_job_handler),
        )
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    if state.ingest_trigger_token.is_none() {
        tracing::warn!("INGEST_TRIGGER_TOKEN not set; manual ingestion trigger is disabled");
    }

    let cors = match HeaderValue::from_str(&state.client_url) {
        Ok(origin) => CorsLayer::new().allow_origin(origin).allow_credentials(true),
        Err(e) => {
            tracing::warn!(error = %e, client_url = %state.client_url, "Invalid CLIENT_URL, CORS disabled");
            CorsLayer::new()
        }
    }
    .allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([
        AUTHORIZATION,
        CONTENT_TYPE,
        HeaderName::from_static(INGEST_TOKEN_HEADER),
    ]);

    // Clone jwt_service for middleware closure
    let jwt_service = state.jwt_service.clone();

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api/v1", api_routes())
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
}
