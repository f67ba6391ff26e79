use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Suggestion;

pub struct SuggestionService {
    pool: PgPool,
}

impl SuggestionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Suggestions whose active window strictly contains `at`.
    pub async fn active_at(&self, at: DateTime<Utc>) -> Result<Vec<Suggestion>, DatabaseError> {
        let suggestions = sqlx::query_as::<_, Suggestion>(
            "SELECT id, search_string, poster_id, category_id, latitude, longitude, radius_km, \
             banner_url, active_from, inactive_by \
             FROM suggestions WHERE active_from < $1 AND $1 < inactive_by \
             ORDER BY active_from, id",
        )
        .bind(at)
        .fetch_all(&self.pool)
        .await?;
        Ok(suggestions)
    }
}
