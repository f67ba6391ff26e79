// handlers/protected/images.rs - POST/DELETE /api/deal_image

use axum::extract::Extension;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::validate;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, SessionUser};
use crate::services::ImageService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAddRequest {
    pub deal_id: Uuid,
    pub image_url: String,
    pub poster_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRemoveRequest {
    pub deal_image_id: Uuid,
}

pub async fn image_add(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<ImageAddRequest>,
) -> ApiResult<Value> {
    session.ensure_self(body.poster_id)?;
    validate::image_url(&body.image_url)?;
    let image_id = ImageService::new(pool).add(body.deal_id, session.id, &body.image_url).await?;
    Ok(ApiResponse::created(json!({ "dealImageId": image_id })))
}

pub async fn image_remove(
    session: SessionUser,
    Extension(pool): Extension<PgPool>,
    ApiJson(body): ApiJson<ImageRemoveRequest>,
) -> ApiResult<Value> {
    ImageService::new(pool).remove(body.deal_image_id, session.id).await?;
    Ok(ApiResponse::success(json!({ "dealImageId": body.deal_image_id })))
}
