// handlers/protected/hidden.rs - POST/DELETE /api/deal_hidden

use axum::extract::Extension;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::{ApiJson, ApiResponse, ApiResult, SessionUser};
use crate::services::DealService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HideRequest {
    pub deal_id: Uuid,
    pub user_id: Option<Uuid>,
}

pub async fn deal_hide(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<HideRequest>,
) -> ApiResult<Value> {
    session.ensure_self(body.user_id)?;
    DealService::new(pool).hide(body.deal_id, session.id).await?;
    Ok(ApiResponse::success(json!({ "dealId": body.deal_id })))
}

pub async fn deal_unhide(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<HideRequest>,
) -> ApiResult<Value> {
    session.ensure_self(body.user_id)?;
    DealService::new(pool).unhide(body.deal_id, session.id).await?;
    Ok(ApiResponse::success(json!({ "dealId": body.deal_id })))
}
