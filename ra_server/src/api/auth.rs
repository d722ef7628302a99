//! Authentication API handlers.
//!
//! # Examples
//!
//! Register a new account:
//! ```bash
//! curl -X POST http://localhost:50051/api/v1/auth/register \
//!   -H "Content-Type: application/json" \
//!   -d '{"email": "a@x.com", "username": "alice", "password": "pw1"}'
//! ```
//!
//! Login:
//! ```bash
//! curl -X POST http://localhost:50051/api/v1/auth/login \
//!   -H "Content-Type: application/json" \
//!   -d '{"email": "a@x.com", "password": "pw1"}'
//! ```

use axum::{extract::State, http::StatusCode, Json};
use remote_auth::auth::{AuthError, LoginRequest, RegisterRequest};
use serde::{Deserialize, Serialize};

use super::{error_response, AppState, ErrorResponse, MessageResponse};
use crate::{logging, metrics};

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Register a new account.
///
/// # Response
///
/// On success, returns `200 OK`:
/// ```json
/// {"message": "User registered successfully."}
/// ```
///
/// # Errors
///
/// - `409 Conflict`: the email is already registered ("Email already exists.")
/// - `500 Internal Server Error`: storage or hashing failure
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!(email = %payload.email, "Register request received");

    let request = RegisterRequest {
        email: payload.email.clone(),
        username: payload.username,
        password: payload.password,
    };

    match state.auth_manager.register(request).await {
        Ok(()) => {
            metrics::record_auth_request("register", "ok");
            Ok(Json(MessageResponse {
                message: "User registered successfully.".to_string(),
            }))
        }
        Err(e) => {
            if matches!(e, AuthError::EmailTaken) {
                metrics::record_auth_request("register", "conflict");
                logging::log_security_event(
                    "duplicate_registration",
                    Some(payload.email.as_str()),
                    "Registration attempt for existing email",
                );
            } else {
                metrics::record_auth_request("register", "error");
            }
            Err(error_response(&e))
        }
    }
}

/// Authenticate an account and return a session token.
///
/// # Response
///
/// On success, returns `200 OK`:
/// ```json
/// {"token": "eyJhbGciOiJIUzI1NiIs..."}
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: unknown email or wrong password; the detail
///   ("Invalid email or password.") does not reveal which
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!(email = %payload.email, "Login request received");

    let request = LoginRequest {
        email: payload.email.clone(),
        password: payload.password,
    };

    match state.auth_manager.login(request).await {
        Ok(token) => {
            metrics::record_auth_request("login", "ok");
            Ok(Json(LoginResponse { token }))
        }
        Err(e) => {
            metrics::record_auth_request("login", "unauthenticated");
            logging::log_security_event(
                "failed_login",
                Some(payload.email.as_str()),
                "Invalid credentials presented",
            );
            Err(error_response(&e))
        }
    }
}
