// handlers/protected/likes.rs - POST/DELETE /api/deal_like

use axum::extract::Extension;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, SessionUser};
use crate::services::LikeService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub deal_id: Uuid,
    pub user_id: Option<Uuid>,
    pub up_vote: Option<bool>,
}

/// Upsert: a second vote replaces the first.
pub async fn like_vote(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<LikeRequest>,
) -> ApiResult<Value> {
    session.ensure_self(body.user_id)?;
    let up_vote = body.up_vote.ok_or_else(|| ApiError::bad_request("Missing upVote"))?;
    LikeService::new(pool).vote(body.deal_id, session.id, up_vote).await?;
    Ok(ApiResponse::success(json!({ "isUpvote": up_vote })))
}

pub async fn like_clear(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<LikeRequest>,
) -> ApiResult<Value> {
    session.ensure_self(body.user_id)?;
    LikeService::new(pool).clear(body.deal_id, session.id).await?;
    Ok(ApiResponse::success(json!({ "isUpvote": null })))
}
