// handlers/public/images.rs - GET /api/deal/:dealId/images

use axum::extract::{Extension, Path};
use sqlx::PgPool;

use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ImageService;

pub async fn deal_images(Extension(pool): Extension<PgPool>, Path(deal_id): Path<String>) -> ApiResult<Vec<String>> {
    let deal_id = validate::parse_id(&deal_id, "deal")?;
    let urls = ImageService::new(pool).urls(deal_id).await?;
    Ok(ApiResponse::success(urls))
}
