// handlers/protected/comments.rs - POST/PUT/DELETE /api/deal_comment

use axum::extract::Extension;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::validate;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, SessionUser};
use crate::services::CommentService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAddRequest {
    pub deal_id: Uuid,
    pub user_id: Option<Uuid>,
    pub comment: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEditRequest {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub comment: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRemoveRequest {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
}

pub async fn comment_add(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<CommentAddRequest>,
) -> ApiResult<Value> {
    session.ensure_self(body.user_id)?;
    validate::comment(&body.comment)?;
    let comment_id = CommentService::new(pool).add(body.deal_id, session.id, &body.comment).await?;
    Ok(ApiResponse::created(json!({ "commentId": comment_id })))
}

/// Authors only; anyone else's comment reads as not found.
pub async fn comment_edit(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<CommentEditRequest>,
) -> ApiResult<Value> {
    session.ensure_self(body.user_id)?;
    validate::comment(&body.comment)?;
    let comment_id = CommentService::new(pool).edit(body.id, session.id, &body.comment).await?;
    Ok(ApiResponse::success(json!({ "commentId": comment_id })))
}

pub async fn comment_remove(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<CommentRemoveRequest>,
) -> ApiResult<Value> {
    session.ensure_self(body.user_id)?;
    let comment_id = CommentService::new(pool).remove(body.id, session.id).await?;
    Ok(ApiResponse::success(json!({ "commentId": comment_id })))
}
