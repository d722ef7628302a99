//! Signed session token issuance and validation.
//!
//! Tokens are HS256 JWTs carrying the subject email and an absolute
//! expiry. The service is purely functional given its keys: no state is
//! kept per token, so validation needs no storage or locking.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};

use super::{
    errors::{AuthError, AuthResult, TokenError},
    models::Claims,
};

/// Default session token lifetime in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 600;

/// Issues and validates signed session tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a token service from a signing secret.
    ///
    /// # Errors
    ///
    /// * `AuthError::MissingSecret` - the secret is empty
    pub fn new(secret: &str) -> AuthResult<Self> {
        if secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        // Strict expiry: the default 60s leeway would keep expired tokens
        // alive past their encoded timestamp.
        let mut validation = Validation::default();
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Issue a signed token for `subject` expiring `ttl` from now.
    pub fn issue(&self, subject: &str, ttl: Duration) -> AuthResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;

        Ok(token)
    }

    /// Validate a token's signature and expiry, returning its claims.
    ///
    /// Signature mismatches, expiry, and structural garbage are reported
    /// as distinct [`TokenError`] kinds.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => Err(match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(
            TokenService::new(""),
            Err(AuthError::MissingSecret)
        ));
    }

    #[test]
    fn issued_token_round_trips() {
        let service = TokenService::new("test_secret_key").unwrap();
        let token = service
            .issue("a@example.com", Duration::seconds(DEFAULT_TOKEN_TTL_SECS))
            .unwrap();

        let claims = service.verify(&token).expect("fresh token should verify");
        assert_eq!(claims.sub, "a@example.com");
        assert!(claims.exp > Utc::now().timestamp());
        assert!(claims.iat <= claims.exp);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let service = TokenService::new("test_secret_key").unwrap();
        let token = service
            .issue("a@example.com", Duration::seconds(-10))
            .unwrap();

        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn foreign_key_is_rejected_as_invalid_signature() {
        let issuer = TokenService::new("one_secret_key").unwrap();
        let verifier = TokenService::new("another_secret_key").unwrap();
        let token = issuer.issue("a@example.com", Duration::seconds(60)).unwrap();

        assert_eq!(verifier.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn garbage_is_rejected_as_malformed() {
        let service = TokenService::new("test_secret_key").unwrap();

        assert_eq!(service.verify("not-a-jwt"), Err(TokenError::Malformed));
        assert_eq!(service.verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn expired_and_malformed_are_distinct() {
        let service = TokenService::new("test_secret_key").unwrap();
        let expired = service
            .issue("a@example.com", Duration::seconds(-10))
            .unwrap();

        assert_ne!(service.verify(&expired), service.verify("not-a-jwt"));
    }
}
