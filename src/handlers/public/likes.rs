// handlers/public/likes.rs - vote reads

use axum::extract::{Extension, Path};
use sqlx::PgPool;

use crate::database::models::{LikeSummary, UserLike};
use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::LikeService;

/// GET /api/deal/:dealId/likes
pub async fn deal_likes(Extension(pool): Extension<PgPool>, Path(deal_id): Path<String>) -> ApiResult<LikeSummary> {
    let deal_id = validate::parse_id(&deal_id, "deal")?;
    let summary = LikeService::new(pool).summary(deal_id).await?;
    Ok(ApiResponse::success(summary))
}

/// GET /api/deal/:dealId/like/:userId
pub async fn deal_like_get(
    Extension(pool): Extension<PgPool>,
    Path((deal_id, user_id)): Path<(String, String)>,
) -> ApiResult<UserLike> {
    let deal_id = validate::parse_id(&deal_id, "deal")?;
    let user_id = validate::parse_id(&user_id, "user")?;
    let like = LikeService::new(pool).user_like(deal_id, user_id).await?;
    Ok(ApiResponse::success(like))
}
