// handlers/public/memberships.rs - membership reads

use axum::extract::{Extension, Path, Query};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::config;
use crate::database::models::DealMember;
use crate::error::ApiError;
use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::MembershipService;

#[derive(Debug, Deserialize)]
pub struct MembersQuery {
    pub base: Option<String>,
    pub limit: Option<String>,
}

/// GET /api/deal/:dealId/memberships?base=&limit=
pub async fn deal_members(
    Extension(pool): Extension<PgPool>,
    Path(deal_id): Path<String>,
    Query(query): Query<MembersQuery>,
) -> ApiResult<Vec<DealMember>> {
    let deal_id = validate::parse_id(&deal_id, "deal")?;
    let base = query
        .base
        .as_deref()
        .filter(|b| !b.is_empty())
        .map(|b| validate::parse_timestamp(b, "base"))
        .transpose()?;
    let limit = members_limit(query.limit.as_deref())?;

    let members = MembershipService::new(pool).members(deal_id, base, limit).await?;
    Ok(ApiResponse::success(members))
}

fn members_limit(raw: Option<&str>) -> Result<i64, ApiError> {
    let listing = &config::config().listing;
    match raw.filter(|l| !l.is_empty()) {
        None => Ok(listing.default_page_size),
        Some(raw) => match raw.parse::<i64>() {
            Ok(limit) if limit > 0 => Ok(limit.min(listing.max_page_size)),
            _ => Err(ApiError::bad_request("Invalid limit")),
        },
    }
}

/// GET /api/deal/:dealId/membership/:userId
pub async fn deal_membership_get(
    Extension(pool): Extension<PgPool>,
    Path((deal_id, user_id)): Path<(String, String)>,
) -> ApiResult<Value> {
    let deal_id = validate::parse_id(&deal_id, "deal")?;
    let user_id = validate::parse_id(&user_id, "user")?;
    let is_member = MembershipService::new(pool).is_member(deal_id, user_id).await?;
    Ok(ApiResponse::success(json!({ "result": is_member })))
}
