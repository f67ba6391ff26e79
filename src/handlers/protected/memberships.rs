// handlers/protected/memberships.rs - POST/DELETE /api/deal_membership

use axum::extract::Extension;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::{ApiJson, ApiResponse, ApiResult, SessionUser};
use crate::services::MembershipService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRequest {
    pub deal_id: Uuid,
    pub user_id: Option<Uuid>,
}

pub async fn membership_join(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<MembershipRequest>,
) -> ApiResult<Value> {
    session.ensure_self(body.user_id)?;
    MembershipService::new(pool).join(body.deal_id, session.id).await?;
    Ok(ApiResponse::success(json!({ "result": "Updated membership" })))
}

pub async fn membership_leave(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<MembershipRequest>,
) -> ApiResult<Value> {
    session.ensure_self(body.user_id)?;
    MembershipService::new(pool).leave(body.deal_id, session.id).await?;
    Ok(ApiResponse::success(json!({ "result": "Removed membership" })))
}
