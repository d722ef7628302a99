//! Structured logging configuration.
//!
//! Request handlers log every operation received, and authentication
//! failures additionally go through [`log_security_event`] so they can be
//! filtered and alerted on.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging
///
/// Log levels are configurable via the `RUST_LOG` env var.
///
/// # Example
///
/// ```no_run
/// use ra_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,hyper=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log security event with structured data
///
/// # Example
///
/// ```
/// use ra_server::logging::log_security_event;
///
/// log_security_event("failed_login", Some("a@example.com"), "Invalid password attempt");
/// ```
pub fn log_security_event(event_type: &str, email: Option<&str>, message: &str) {
    tracing::warn!(
        event_type = event_type,
        email = email,
        "SECURITY: {}",
        message
    );
}
