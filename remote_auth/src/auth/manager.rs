//! Authentication manager implementation.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Duration;
use std::sync::Arc;

use super::{
    errors::{AuthError, AuthResult, TokenError},
    models::{Claims, LoginRequest, RegisterRequest},
    token::TokenService,
};
use crate::db::store::CredentialStore;

/// Orchestrates the credential store and token service.
///
/// Holds no per-session state: a login hands the caller a signed token
/// and the server forgets about it; access checks are a pure function of
/// the presented token.
#[derive(Clone)]
pub struct AuthManager {
    store: Arc<dyn CredentialStore>,
    tokens: TokenService,
    token_ttl: Duration,
}

impl AuthManager {
    /// Create a new authentication manager
    ///
    /// # Arguments
    ///
    /// * `store` - Account persistence backend
    /// * `tokens` - Token service holding the signing secret
    /// * `token_ttl` - Lifetime of issued session tokens
    pub fn new(store: Arc<dyn CredentialStore>, tokens: TokenService, token_ttl: Duration) -> Self {
        Self {
            store,
            tokens,
            token_ttl,
        }
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// * `AuthError::EmailTaken` - the email is already registered
    /// * `AuthError::HashingFailed` - password hashing failed
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<()> {
        let password_hash = self.hash_password(&request.password)?;

        self.store
            .insert(&request.email, &request.username, &password_hash)
            .await?;

        Ok(())
    }

    /// Log in and obtain a session token
    ///
    /// Unknown emails and wrong passwords are indistinguishable to the
    /// caller.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidCredentials` - no account matches
    pub async fn login(&self, request: LoginRequest) -> AuthResult<String> {
        let account = self
            .store
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        self.verify_password(&request.password, &account.password_hash)?;

        self.tokens.issue(&account.email, self.token_ttl)
    }

    /// Check a presented session token, returning its claims on success
    ///
    /// # Errors
    ///
    /// * `AuthError::Token(TokenError::Missing)` - no token supplied
    /// * `AuthError::Token(TokenError::Expired)` - expiry has passed
    /// * `AuthError::Token(_)` - forged or malformed token
    pub fn access(&self, token: Option<&str>) -> AuthResult<Claims> {
        let token = token.ok_or(TokenError::Missing)?;
        Ok(self.tokens.verify(token)?)
    }

    /// Delete every account. Administrative/test support only.
    pub async fn cleanup(&self) -> AuthResult<u64> {
        self.store.clear().await
    }

    /// Hash a password with Argon2id and a fresh random salt
    fn hash_password(&self, password: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        Ok(argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| AuthError::HashingFailed)?
            .to_string())
    }

    /// Verify a password against a stored hash
    fn verify_password(&self, password: &str, hash: &str) -> AuthResult<()> {
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
        let argon2 = Argon2::default();

        argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)
    }
}
