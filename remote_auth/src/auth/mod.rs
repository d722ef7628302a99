//! Authentication module providing registration, login, and token-gated access.
//!
//! This module implements the service core:
//! - Argon2id password hashing with per-account random salts
//! - HS256 JWT session tokens with strict expiry (no leeway)
//! - A manager orchestrating the credential store and token service
//!
//! ## Example
//!
//! ```no_run
//! use remote_auth::auth::{AuthManager, LoginRequest, RegisterRequest, TokenService};
//! use remote_auth::db::{Database, DatabaseConfig, SqliteCredentialStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let store = Arc::new(SqliteCredentialStore::new(db.pool().clone()));
//!     let auth = AuthManager::new(
//!         store,
//!         TokenService::new("jwt_secret")?,
//!         chrono::Duration::seconds(600),
//!     );
//!
//!     auth.register(RegisterRequest {
//!         email: "a@example.com".to_string(),
//!         username: "alice".to_string(),
//!         password: "pw".to_string(),
//!     })
//!     .await?;
//!
//!     let token = auth
//!         .login(LoginRequest {
//!             email: "a@example.com".to_string(),
//!             password: "pw".to_string(),
//!         })
//!         .await?;
//!
//!     let claims = auth.access(Some(&token))?;
//!     println!("Authenticated as {}", claims.sub);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod token;

pub use errors::{AuthError, AuthResult, TokenError};
pub use manager::AuthManager;
pub use models::{Account, AccountId, Claims, LoginRequest, RegisterRequest};
pub use token::{TokenService, DEFAULT_TOKEN_TTL_SECS};
