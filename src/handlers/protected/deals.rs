// handlers/protected/deals.rs - poster-owned deal writes

use axum::extract::{Extension, Path};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::database::models::DealInput;
use crate::handlers::validate;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, SessionUser};
use crate::services::DealService;

/// POST /api/deals - the session user becomes poster and first member
pub async fn deal_create(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(input): ApiJson<DealInput>,
) -> ApiResult<Value> {
    let input = validate::deal_input(input, true)?;
    let deal_id = DealService::new(pool).create(session.id, &input).await?;
    Ok(ApiResponse::created(json!({ "dealId": deal_id })))
}

/// PUT /api/deal/:dealId
pub async fn deal_update(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    Path(deal_id): Path<String>,
    ApiJson(input): ApiJson<DealInput>,
) -> ApiResult<Value> {
    let deal_id = validate::parse_id(&deal_id, "deal")?;
    let input = validate::deal_input(input, false)?;
    let deal_id = DealService::new(pool).update(deal_id, session.id, &input).await?;
    Ok(ApiResponse::success(json!({ "dealId": deal_id })))
}

/// DELETE /api/deal/:dealId - soft delete
pub async fn deal_delete(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    Path(deal_id): Path<String>,
) -> ApiResult<Value> {
    let deal_id = validate::parse_id(&deal_id, "deal")?;
    DealService::new(pool).deactivate(deal_id, session.id).await?;
    tracing::info!("Deal {} deactivated by {}", deal_id, session.id);
    Ok(ApiResponse::success(json!({ "dealId": deal_id })))
}
