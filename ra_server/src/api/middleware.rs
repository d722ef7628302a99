//! Token validation middleware for protected endpoints.
//!
//! Extracts the session token from the `authorization` header, validates
//! it, and injects the verified claims into request extensions for
//! downstream handlers. An optional `Bearer ` prefix is accepted.
//!
//! # Extracting claims
//!
//! ```rust,no_run
//! use axum::extract::Extension;
//! use remote_auth::auth::Claims;
//!
//! async fn protected_handler(Extension(claims): Extension<Claims>) -> String {
//!     format!("Authenticated as {}", claims.sub)
//! }
//! # let _ = protected_handler;
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use remote_auth::auth::{AuthError, TokenError};

use super::{error_response, AppState, ErrorResponse};
use crate::{logging, metrics};

/// Validate the presented session token and inject its claims.
///
/// # Behavior
///
/// - **Valid token**: claims land in request extensions, the handler runs
/// - **No header**: `401` with detail "Token is missing."
/// - **Expired token**: `401` with detail "Token has expired."
/// - **Forged or malformed token**: `401` with detail "Invalid token."
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value));

    match state.auth_manager.access(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(e) => {
            metrics::record_auth_request("access", rejection_kind(&e));
            logging::log_security_event("rejected_token", None, &e.client_message());
            Err(error_response(&e))
        }
    }
}

fn rejection_kind(err: &AuthError) -> &'static str {
    match err {
        AuthError::Token(TokenError::Missing) => "token_missing",
        AuthError::Token(TokenError::Expired) => "token_expired",
        AuthError::Token(_) => "token_invalid",
        _ => "error",
    }
}
