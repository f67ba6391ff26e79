use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{decode_session, session_token};
use crate::config;
use crate::error::ApiError;

/// User identified by a valid session cookie
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionUser {
    pub id: Uuid,
}

impl SessionUser {
    /// Bodies may name the acting user; it must be the session user.
    pub fn ensure_self(&self, claimed: Option<Uuid>) -> Result<(), ApiError> {
        match claimed {
            Some(user_id) if user_id != self.id => {
                tracing::warn!("User {} attempted to act as {}", self.id, user_id);
                Err(ApiError::forbidden("Cannot act on behalf of another user"))
            }
            _ => Ok(()),
        }
    }
}

/// Attaches [`SessionUser`] when the request carries a valid session cookie.
/// Requests without one pass through unchanged.
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let security = &config::config().security;

    if let Some(token) = session_token(request.headers(), &security.session_cookie_name) {
        match decode_session(&token, security) {
            Ok(claims) => {
                request.extensions_mut().insert(SessionUser { id: claims.sub });
            }
            Err(e) => tracing::debug!("Ignoring session cookie: {}", e),
        }
    }

    next.run(request).await
}

/// Rejects requests that reached it without a session.
pub async fn require_session_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    if request.extensions().get::<SessionUser>().is_none() {
        return Err(ApiError::unauthorized("Authentication required"));
    }
    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .copied()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}
