// handlers/public/suggestions.rs - GET /api/suggestions?after=

use axum::extract::{Extension, Query};
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;

use crate::database::models::Suggestion;
use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::SuggestionService;

#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    pub after: Option<String>,
}

/// Banners active at `after`, or now when absent.
pub async fn suggestions_list(
    Extension(pool): Extension<PgPool>,
    Query(query): Query<SuggestionsQuery>,
) -> ApiResult<Vec<Suggestion>> {
    let at = match query.after.as_deref().filter(|a| !a.is_empty()) {
        Some(raw) => validate::parse_timestamp(raw, "after")?,
        None => Utc::now(),
    };
    let suggestions = SuggestionService::new(pool).active_at(at).await?;
    Ok(ApiResponse::success(suggestions))
}
