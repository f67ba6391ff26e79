// handlers/public/auth.rs - sign-in and registration
//
// The identity provider checks credentials and hands the client a token;
// these handlers verify that token, then find or create the account and
// start a session.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::auth::{self, IdentityVerifier};
use crate::database::models::{Account, AuthType, NewAccount};
use crate::error::ApiError;
use crate::handlers::validate;
use crate::middleware::{ApiJson, ApiResponse};
use crate::services::UserService;

pub type Verifier = Arc<dyn IdentityVerifier>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRegisterRequest {
    pub email: String,
    pub token: String,
    pub display_name: String,
    pub country_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialRegisterRequest {
    pub email: String,
    pub token: String,
    pub display_name: String,
    pub country_code: String,
    pub image_url: Option<String>,
    pub auth_type: AuthType,
}

/// POST /api/login/email and /api/login/social
///
/// Unknown emails answer `{"to_register": true}` so the client can collect
/// a display name and register.
pub async fn login(
    Extension(verifier): Extension<Verifier>,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Response, ApiError> {
    let (Some(email), Some(token)) = (
        body.email.filter(|e| !e.trim().is_empty()),
        body.token.filter(|t| !t.is_empty()),
    ) else {
        return Err(ApiError::bad_request("Missing email or token"));
    };
    let email = validate::email(&email)?;
    verifier.verify_email(&token, &email).await?;

    let users = UserService::new(pool);
    let Some(account) = users.find_by_email(&email).await? else {
        return Ok(ApiResponse::success(json!({ "to_register": true })).into_response());
    };
    if users.is_banned(account.id).await? {
        tracing::warn!("Banned user {} tried to sign in", account.id);
        return Err(ApiError::forbidden("User is banned"));
    }

    tracing::info!("User {} signed in", account.id);
    start_session(account, StatusCode::OK)
}

/// POST /api/register/email
pub async fn register_email(
    Extension(verifier): Extension<Verifier>,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<EmailRegisterRequest>,
) -> Result<Response, ApiError> {
    let account = NewAccount {
        email: validate::email(&body.email)?,
        display_name: body.display_name,
        country_code: body.country_code,
        image_url: None,
        auth_type: AuthType::Email,
    };
    register(verifier, pool, &body.token, account).await
}

/// POST /api/register/social_media
pub async fn register_social(
    Extension(verifier): Extension<Verifier>,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<SocialRegisterRequest>,
) -> Result<Response, ApiError> {
    if body.auth_type == AuthType::Email {
        return Err(ApiError::bad_request("Invalid auth type"));
    }
    let account = NewAccount {
        email: validate::email(&body.email)?,
        display_name: body.display_name,
        country_code: body.country_code,
        image_url: body.image_url.filter(|u| !u.is_empty()),
        auth_type: body.auth_type,
    };
    register(verifier, pool, &body.token, account).await
}

async fn register(verifier: Verifier, pool: PgPool, token: &str, account: NewAccount) -> Result<Response, ApiError> {
    let account = validate::new_account(account)?;
    if token.is_empty() {
        return Err(ApiError::bad_request("Missing token"));
    }
    verifier.verify_email(token, &account.email).await?;

    let created = UserService::new(pool).create(&account).await?;
    start_session(created, StatusCode::CREATED)
}

fn start_session(account: Account, status: StatusCode) -> Result<Response, ApiError> {
    let cookie = auth::issue_session_cookie(account.id)?;
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        ApiResponse::with_status(account, status),
    )
        .into_response())
}
