//! The token-gated protected resource.

use axum::{Extension, Json};
use remote_auth::auth::Claims;

use super::MessageResponse;
use crate::metrics;

/// Serve the protected resource to an authenticated caller.
///
/// Token validation already happened in
/// [`auth_middleware`](super::middleware::auth_middleware); by the time
/// this handler runs the claims are verified.
pub async fn access_protected_resource(
    Extension(claims): Extension<Claims>,
) -> Json<MessageResponse> {
    tracing::info!(subject = %claims.sub, "AccessProtectedResource request received");
    metrics::record_auth_request("access", "ok");

    Json(MessageResponse {
        message: "Access granted to protected method.".to_string(),
    })
}
