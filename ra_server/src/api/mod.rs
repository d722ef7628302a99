//! HTTP API for the remote authentication server.
//!
//! # Architecture
//!
//! The API is built with:
//! - **Axum**: Async web framework routing the four operations
//! - **JWT**: Signed expiring session tokens gating the protected route
//!
//! # Modules
//!
//! - [`auth`]: Registration and login endpoints
//! - [`protected`]: The token-gated resource
//! - [`admin`]: Administrative database wipe
//! - [`middleware`]: Token validation for protected endpoints
//! - [`request_id`]: Request ID correlation for logs
//!
//! # Endpoints Overview
//!
//! ```text
//! GET  /health                    - Health check (public)
//! POST /api/v1/auth/register      - Register account (public)
//! POST /api/v1/auth/login         - Login, returns session token (public)
//! GET  /api/v1/protected          - Protected resource (token required)
//! POST /api/v1/admin/cleanup      - Wipe all accounts (public; see below)
//! ```
//!
//! The cleanup route carries no authentication. That mirrors the wire
//! contract this server is compatible with and is a documented gap, not a
//! supported production configuration.
//!
//! # Security
//!
//! - Session tokens expire; expired and otherwise-invalid tokens are
//!   reported distinctly
//! - Passwords are hashed before storage
//! - CORS is configured permissively for development

pub mod admin;
pub mod auth;
pub mod middleware;
pub mod protected;
pub mod request_id;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use remote_auth::auth::{AuthError, AuthManager};
use serde::Serialize;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request (cheap due to the Arc wrapper).
#[derive(Clone)]
pub struct AppState {
    pub auth_manager: Arc<AuthManager>,
    pub pool: SqlitePool,
}

/// Body of every successful message-bearing response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of every failed response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Translate an authentication failure into its wire representation.
///
/// Conflicts map to 409, credential and token failures to 401, and
/// everything else to a sanitized 500. The detail string keeps expired
/// and otherwise-invalid tokens distinguishable.
pub(crate) fn error_response(err: &AuthError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        AuthError::EmailTaken => StatusCode::CONFLICT,
        AuthError::InvalidCredentials | AuthError::Token(_) => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.client_message(),
        }),
    )
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Example
///
/// ```rust,no_run
/// # use ra_server::api::{create_router, AppState};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let state: AppState = unimplemented!();
/// let app = create_router(state);
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:50051").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn create_router(state: AppState) -> Router {
    let v1_routes = create_v1_router(state.clone());

    let root_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(root_routes)
        .nest("/api/v1", v1_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create API v1 router with all versioned endpoints.
fn create_v1_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/admin/cleanup", post(admin::cleanup));

    let protected_routes = Router::new()
        .route("/protected", get(protected::access_protected_resource))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    Router::new().merge(public_routes).merge(protected_routes)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` when the database answers, `503 Service Unavailable`
/// otherwise.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = sqlx::query("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .is_ok();

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if db_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
