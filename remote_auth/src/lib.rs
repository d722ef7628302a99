//! # Remote Auth
//!
//! A minimal remote authentication library: account registration with
//! email uniqueness, password verification, and signed expiring session
//! tokens gating access to protected operations.
//!
//! The library is transport-agnostic. A server crate wires [`AuthManager`]
//! to an HTTP API; this crate owns the invariants:
//!
//! - at most one account per email, enforced by the storage engine
//! - a session token is valid iff its signature matches the service
//!   secret and the current time is strictly before its expiry
//! - expired, forged, malformed, and missing tokens are distinct failures
//!
//! ## Core Modules
//!
//! - [`auth`]: manager, token service, models, and error taxonomy
//! - [`db`]: SQLite connection pooling and the credential store
//!
//! ## Example
//!
//! ```no_run
//! use remote_auth::auth::{AuthManager, RegisterRequest, TokenService};
//! use remote_auth::db::{Database, DatabaseConfig, SqliteCredentialStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::default()).await?;
//!     let store = Arc::new(SqliteCredentialStore::new(db.pool().clone()));
//!     let tokens = TokenService::new("jwt_secret")?;
//!     let auth = AuthManager::new(store, tokens, chrono::Duration::seconds(600));
//!
//!     auth.register(RegisterRequest {
//!         email: "player@example.com".to_string(),
//!         username: "player1".to_string(),
//!         password: "SecurePass123".to_string(),
//!     })
//!     .await?;
//!     Ok(())
//! }
//! ```

/// Authentication manager, token service, models, and errors.
pub mod auth;
pub use auth::{
    AuthError, AuthManager, AuthResult, Claims, LoginRequest, RegisterRequest, TokenError,
    TokenService, DEFAULT_TOKEN_TTL_SECS,
};

/// Database pooling and credential storage.
pub mod db;
pub use db::{CredentialStore, Database, DatabaseConfig, SqliteCredentialStore};
