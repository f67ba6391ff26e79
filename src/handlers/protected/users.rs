// handlers/protected/users.rs - account actions for the session user

use axum::{
    extract::Extension,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth;
use crate::config;
use crate::database::models::UserUpdate;
use crate::error::ApiError;
use crate::handlers::validate;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, SessionUser};
use crate::services::UserService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRequest {
    pub blocked_id: Uuid,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub reported_id: Uuid,
    pub reporter_id: Option<Uuid>,
    pub reason: String,
}

/// PUT /api/user
pub async fn user_update(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(update): ApiJson<UserUpdate>,
) -> ApiResult<Value> {
    let update = validate::user_update(update)?;
    UserService::new(pool).update(session.id, &update).await?;
    Ok(ApiResponse::success(json!({ "result": "Updated user" })))
}

/// POST /api/user_blocked
pub async fn user_block(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<BlockRequest>,
) -> ApiResult<Value> {
    session.ensure_self(body.user_id)?;
    if body.blocked_id == session.id {
        return Err(ApiError::bad_request("Cannot block yourself"));
    }
    UserService::new(pool).block(session.id, body.blocked_id).await?;
    Ok(ApiResponse::success(json!({ "blockedId": body.blocked_id })))
}

/// DELETE /api/user_blocked
pub async fn user_unblock(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<BlockRequest>,
) -> ApiResult<Value> {
    session.ensure_self(body.user_id)?;
    UserService::new(pool).unblock(session.id, body.blocked_id).await?;
    Ok(ApiResponse::success(json!({ "blockedId": body.blocked_id })))
}

/// POST /api/user_reported
pub async fn user_report(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<ReportRequest>,
) -> ApiResult<Value> {
    session.ensure_self(body.reporter_id)?;
    if body.reported_id == session.id {
        return Err(ApiError::bad_request("Cannot report yourself"));
    }
    if body.reason.trim().is_empty() {
        return Err(ApiError::bad_request("Missing reason"));
    }
    let report_id = UserService::new(pool)
        .report(session.id, body.reported_id, body.reason.trim())
        .await?;
    Ok(ApiResponse::created(json!({ "reportId": report_id })))
}

/// GET /api/user_banned
pub async fn user_banned(session: SessionUser, Extension(pool): Extension<PgPool>) -> ApiResult<Value> {
    let banned = UserService::new(pool).is_banned(session.id).await?;
    Ok(ApiResponse::success(json!({ "isBanned": banned })))
}

/// POST /api/logout - expires the session cookie
pub async fn logout(session: SessionUser) -> impl IntoResponse {
    let cookie = auth::clear_session_cookie(&config::config().security);
    tracing::info!("User {} logged out", session.id);
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        ApiResponse::success(json!({ "result": "Logged out" })),
    )
}
