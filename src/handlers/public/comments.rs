// handlers/public/comments.rs - GET /api/deal/:dealId/comments

use axum::extract::{Extension, Path};
use sqlx::PgPool;

use crate::database::models::DealComment;
use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::CommentService;

pub async fn deal_comments(
    Extension(pool): Extension<PgPool>,
    Path(deal_id): Path<String>,
) -> ApiResult<Vec<DealComment>> {
    let deal_id = validate::parse_id(&deal_id, "deal")?;
    let comments = CommentService::new(pool).list(deal_id).await?;
    Ok(ApiResponse::success(comments))
}
