// handlers/public/users.rs - GET /api/user/:userId

use axum::extract::{Extension, Path};
use sqlx::PgPool;

use crate::database::models::PublicUser;
use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;

pub async fn user_get(Extension(pool): Extension<PgPool>, Path(user_id): Path<String>) -> ApiResult<PublicUser> {
    let user_id = validate::parse_id(&user_id, "user")?;
    let user = UserService::new(pool).get(user_id).await?;
    Ok(ApiResponse::success(user))
}
