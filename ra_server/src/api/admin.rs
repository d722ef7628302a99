//! Administrative endpoints.

use axum::{extract::State, http::StatusCode, Json};

use super::{error_response, AppState, ErrorResponse};
use crate::metrics;

/// Delete every account from the credential store.
///
/// Test/administrative support only. The route is intentionally left
/// unauthenticated for wire compatibility; do not expose it beyond a
/// trusted network.
///
/// # Response
///
/// `204 No Content` on success.
pub async fn cleanup(
    State(state): State<AppState>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!("CleanupDb request received");

    match state.auth_manager.cleanup().await {
        Ok(removed) => {
            metrics::record_auth_request("cleanup", "ok");
            tracing::info!(removed, "credential store cleared");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            metrics::record_auth_request("cleanup", "error");
            Err(error_response(&e))
        }
    }
}
