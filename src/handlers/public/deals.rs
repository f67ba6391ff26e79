// handlers/public/deals.rs - deal reads

use std::collections::HashMap;

use axum::extract::{Extension, Path, Query};
use sqlx::PgPool;

use crate::database::models::{Deal, DealCategory};
use crate::filter::{DealFilter, ParseOptions};
use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult, SessionUser};
use crate::services::DealService;

/// GET /api/deals - filtered, cursor-paginated listing
pub async fn deals_list(
    session: Option<SessionUser>,
    Extension(pool): Extension<PgPool>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Vec<Deal>> {
    list(session, pool, &params, ParseOptions::from_config()).await
}

/// GET /api/deals/search - listing with a mandatory `searchText`
pub async fn deals_search(
    session: Option<SessionUser>,
    Extension(pool): Extension<PgPool>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Vec<Deal>> {
    list(session, pool, &params, ParseOptions::from_config().search()).await
}

async fn list(
    session: Option<SessionUser>,
    pool: PgPool,
    params: &HashMap<String, String>,
    options: ParseOptions,
) -> ApiResult<Vec<Deal>> {
    // Validation fails the request before any SQL is built
    let criteria = DealFilter::from_query(params, &options)?.with_viewer(session.map(|s| s.id));
    let deals = DealService::new(pool).list(criteria).await?;
    Ok(ApiResponse::success(deals))
}

/// GET /api/deal/:dealId
pub async fn deal_get(Extension(pool): Extension<PgPool>, Path(deal_id): Path<String>) -> ApiResult<Deal> {
    let deal_id = validate::parse_id(&deal_id, "deal")?;
    let deal = DealService::new(pool).get(deal_id).await?;
    Ok(ApiResponse::success(deal))
}

/// GET /api/deals/categories
pub async fn categories_list(Extension(pool): Extension<PgPool>) -> ApiResult<Vec<DealCategory>> {
    let categories = DealService::new(pool).categories().await?;
    Ok(ApiResponse::success(categories))
}
