//! Authentication error types.

use thiserror::Error;

/// Token validation errors
///
/// `Expired` and the two invalid kinds must stay distinguishable all the
/// way to the caller, so they are separate variants rather than one
/// catch-all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// No token was supplied with the request
    #[error("Token is missing.")]
    Missing,

    /// Token is not a structurally valid JWT
    #[error("Malformed token")]
    Malformed,

    /// Token expiry has passed
    #[error("Token has expired.")]
    Expired,

    /// Token was signed with a different key
    #[error("Invalid token signature")]
    InvalidSignature,
}

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failed
    #[error("Password hashing failed")]
    HashingFailed,

    /// Wrong email or password on login
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Email already registered
    #[error("Email already exists.")]
    EmailTaken,

    /// Signing secret absent or empty
    #[error("Token signing secret must not be empty")]
    MissingSecret,

    /// Token issuance failed
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Token validation failed
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl AuthError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database and JWT internals are sanitized, and the two invalid-token
    /// kinds collapse to one detail while expiry keeps its own.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Database(_) => "Internal server error".to_string(),
            AuthError::HashingFailed | AuthError::Jwt(_) => "Authentication failed".to_string(),
            AuthError::Token(TokenError::Malformed | TokenError::InvalidSignature) => {
                "Invalid token.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
