use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{self, SecurityConfig};

pub mod identity;

pub use identity::{IdentityError, IdentityVerifier, SharedSecretVerifier, VerifiedIdentity};

/// Session cookie payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user_id,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session secret not configured")]
    MissingSecret,

    #[error("Session encoding error: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid session: {0}")]
    Invalid(String),
}

pub fn encode_session(user_id: Uuid, security: &SecurityConfig) -> Result<String, SessionError> {
    if security.session_secret.is_empty() {
        return Err(SessionError::MissingSecret);
    }

    let claims = Claims::new(user_id, security.session_expiry_hours);
    let key = EncodingKey::from_secret(security.session_secret.as_bytes());
    Ok(encode(&Header::default(), &claims, &key)?)
}

pub fn decode_session(token: &str, security: &SecurityConfig) -> Result<Claims, SessionError> {
    if security.session_secret.is_empty() {
        return Err(SessionError::MissingSecret);
    }

    let key = DecodingKey::from_secret(security.session_secret.as_bytes());
    decode::<Claims>(token, &key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| SessionError::Invalid(e.to_string()))
}

/// `Set-Cookie` value carrying a fresh session for `user_id`. Called once the
/// identity provider has verified the user's credentials.
pub fn issue_session_cookie(user_id: Uuid) -> Result<String, SessionError> {
    let security = &config::config().security;
    let token = encode_session(user_id, security)?;
    Ok(session_cookie(&token, security))
}

fn session_cookie(token: &str, security: &SecurityConfig) -> String {
    let max_age = security.session_expiry_hours * 3600;
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        security.session_cookie_name, token, max_age
    );
    if security.secure_cookies {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that expires the session cookie.
pub fn clear_session_cookie(security: &SecurityConfig) -> String {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        security.session_cookie_name
    );
    if security.secure_cookies {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Finds the named cookie across every `Cookie` header.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn security() -> SecurityConfig {
        SecurityConfig {
            session_secret: "test-secret".to_string(),
            session_cookie_name: "groupbuy_session".to_string(),
            identity_token_secret: "test-identity-secret".to_string(),
            session_expiry_hours: 1,
            secure_cookies: false,
            cors_origins: vec![],
        }
    }

    #[test]
    fn sessions_round_trip_the_user_id() {
        let user_id = Uuid::new_v4();
        let token = encode_session(user_id, &security()).unwrap();
        let claims = decode_session(&token, &security()).unwrap();
        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let token = encode_session(Uuid::new_v4(), &security()).unwrap();
        let other = SecurityConfig { session_secret: "other".to_string(), ..security() };
        assert!(matches!(decode_session(&token, &other), Err(SessionError::Invalid(_))));
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        let unset = SecurityConfig { session_secret: String::new(), ..security() };
        assert!(matches!(encode_session(Uuid::new_v4(), &unset), Err(SessionError::MissingSecret)));
    }

    #[test]
    fn finds_session_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("a=1; groupbuy_session=abc.def.ghi"));
        assert_eq!(session_token(&headers, "groupbuy_session").as_deref(), Some("abc.def.ghi"));
        assert_eq!(session_token(&headers, "missing"), None);
    }

    #[test]
    fn cleared_cookie_expires_immediately() {
        let cookie = clear_session_cookie(&SecurityConfig { secure_cookies: true, ..security() });
        assert!(cookie.starts_with("groupbuy_session=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.ends_with("; Secure"));
    }

    #[test]
    fn issued_cookie_carries_a_decodable_token() {
        let user_id = Uuid::new_v4();
        let token = encode_session(user_id, &security()).unwrap();
        let cookie = session_cookie(&token, &security());
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie.split(';').next().unwrap()).unwrap());
        let found = session_token(&headers, "groupbuy_session").unwrap();
        assert_eq!(decode_session(&found, &security()).unwrap().sub, user_id);
    }
}
