use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Claims carried by an access token. `sub` is the user's email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(sub: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: sub.into(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Issues and verifies HS256 bearer tokens with a process-wide secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Lifetime of tokens issued by [`TokenService::issue`].
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        self.issue_with_ttl(subject, self.ttl)
    }

    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, AuthError> {
        let claims = Claims::new(subject, ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Check signature and expiry. Every failure maps to `InvalidCredentials`.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Rejected token: {}", e);
            AuthError::InvalidCredentials
        })?;

        if data.claims.sub.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", Duration::minutes(30))
    }

    #[test]
    fn issued_token_verifies() {
        let tokens = service();
        let token = tokens.issue("alice@example.com").unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = service();
        let token = tokens.issue_with_ttl("alice@example.com", Duration::seconds(-1)).unwrap();
        assert!(matches!(tokens.verify(&token), Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn token_expires_after_ttl() {
        let tokens = service();
        let token = tokens.issue_with_ttl("alice@example.com", Duration::seconds(1)).unwrap();
        assert!(tokens.verify(&token).is_ok());
        std::thread::sleep(std::time::Duration::from_millis(2100));
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let other = TokenService::new("another-secret", Duration::minutes(30));
        let token = other.issue("alice@example.com").unwrap();
        assert!(matches!(service().verify(&token), Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn garbage_is_rejected() {
        let tokens = service();
        assert!(tokens.verify("").is_err());
        assert!(tokens.verify("not.a.jwt").is_err());
    }

    #[test]
    fn empty_subject_is_rejected() {
        let tokens = service();
        let token = tokens.issue("").unwrap();
        assert!(tokens.verify(&token).is_err());
    }
}
