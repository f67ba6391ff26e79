use async_trait::async_trait;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

/// What the identity provider vouches for after checking a sign-in token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Identity provider not configured")]
    NotConfigured,

    #[error("Invalid identity token: {0}")]
    Invalid(String),

    #[error("Identity token does not match email")]
    EmailMismatch,
}

/// Boundary to the external identity provider (email link, Google or
/// Facebook sign-in). Credential checks happen there; this crate only
/// consumes the verdict.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityError>;

    /// Verifies the token and requires it to name `email`.
    async fn verify_email(&self, token: &str, email: &str) -> Result<VerifiedIdentity, IdentityError> {
        let identity = self.verify(token).await?;
        if !identity.email.eq_ignore_ascii_case(email) {
            return Err(IdentityError::EmailMismatch);
        }
        Ok(identity)
    }
}

/// Claims carried by a provider-issued id token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Verifies HS256 id tokens signed with a secret shared with the provider.
pub struct SharedSecretVerifier {
    secret: String,
}

impl SharedSecretVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(security.identity_token_secret.clone())
    }
}

#[async_trait]
impl IdentityVerifier for SharedSecretVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityError> {
        if self.secret.is_empty() {
            return Err(IdentityError::NotConfigured);
        }

        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let claims = decode::<IdentityClaims>(token, &key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| IdentityError::Invalid(e.to_string()))?;

        Ok(VerifiedIdentity {
            email: claims.email.trim().to_lowercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(email: &str, secret: &str, ttl: Duration) -> String {
        let now = Utc::now();
        let claims = IdentityClaims {
            email: email.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[tokio::test]
    async fn accepts_tokens_signed_with_the_shared_secret() {
        let verifier = SharedSecretVerifier::new("provider-secret");
        let identity = verifier
            .verify(&token("Ana@Example.com", "provider-secret", Duration::minutes(5)))
            .await
            .unwrap();
        assert_eq!(identity.email, "ana@example.com");
    }

    #[tokio::test]
    async fn rejects_foreign_and_expired_tokens() {
        let verifier = SharedSecretVerifier::new("provider-secret");
        let foreign = token("ana@example.com", "someone-else", Duration::minutes(5));
        assert!(matches!(verifier.verify(&foreign).await, Err(IdentityError::Invalid(_))));

        let expired = token("ana@example.com", "provider-secret", Duration::hours(-2));
        assert!(matches!(verifier.verify(&expired).await, Err(IdentityError::Invalid(_))));
    }

    #[tokio::test]
    async fn unconfigured_verifier_refuses_everything() {
        let verifier = SharedSecretVerifier::new("");
        let signed = token("ana@example.com", "provider-secret", Duration::minutes(5));
        assert!(matches!(verifier.verify(&signed).await, Err(IdentityError::NotConfigured)));
    }

    #[tokio::test]
    async fn token_must_name_the_requested_email() {
        let verifier = SharedSecretVerifier::new("provider-secret");
        let signed = token("ana@example.com", "provider-secret", Duration::minutes(5));
        assert!(verifier.verify_email(&signed, "ANA@example.com").await.is_ok());
        assert!(matches!(
            verifier.verify_email(&signed, "bob@example.com").await,
            Err(IdentityError::EmailMismatch)
        ));
    }
}
