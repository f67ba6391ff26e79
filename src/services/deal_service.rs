use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Deal, DealCategory, DealInput};
use crate::database::query_builder::QueryBuilder;
use crate::filter::{DealFilter, Filter};

// Geography point kept in step with the latitude/longitude columns
const POINT_FROM_LAT_LNG: &str = "CASE WHEN {lat}::float8 IS NULL OR {lng}::float8 IS NULL THEN NULL \
ELSE ST_SetSRID(ST_MakePoint({lng}, {lat}), 4326)::geography END";

fn point_sql(lat: &str, lng: &str) -> String {
    POINT_FROM_LAT_LNG.replace("{lat}", lat).replace("{lng}", lng)
}

pub struct DealService {
    pool: PgPool,
}

impl DealService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs the composed listing statement for validated criteria.
    pub async fn list(&self, criteria: DealFilter) -> Result<Vec<Deal>, DatabaseError> {
        let sql_result = Filter::new(criteria).to_sql();
        tracing::debug!(query = %sql_result.query, params = sql_result.params.len(), "Listing deals");
        QueryBuilder::<Deal>::new(sql_result).select_all(&self.pool).await
    }

    pub async fn get(&self, deal_id: Uuid) -> Result<Deal, DatabaseError> {
        QueryBuilder::<Deal>::new(Filter::by_id_sql(deal_id))
            .select_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Deal not found".to_string()))
    }

    pub async fn categories(&self) -> Result<Vec<DealCategory>, DatabaseError> {
        let categories = sqlx::query_as::<_, DealCategory>(
            "SELECT id, name, display_name, icon_url, priority, is_active \
             FROM deal_categories WHERE is_active ORDER BY priority, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    /// Inserts the deal, the poster's membership and the optional thumbnail
    /// in one transaction.
    pub async fn create(&self, poster_id: Uuid, input: &DealInput) -> Result<Uuid, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            "INSERT INTO deals (title, description, category_id, poster_id, country_code, \
             latitude, longitude, point, location_text, total_price, quantity, benefits) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, {}, $8, $9, $10, $11) RETURNING id",
            point_sql("$6", "$7")
        );
        let (deal_id,): (Uuid,) = sqlx::query_as(&query)
            .bind(input.title.as_deref())
            .bind(input.description.as_deref())
            .bind(input.category_id)
            .bind(poster_id)
            .bind(input.country_code.as_deref())
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.location_text.as_deref())
            .bind(input.total_price)
            .bind(input.quantity)
            .bind(input.benefits.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO deal_memberships (user_id, deal_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, deal_id) DO NOTHING",
        )
        .bind(poster_id)
        .bind(deal_id)
        .execute(&mut *tx)
        .await?;

        if let Some(image_url) = input.image_url.as_deref() {
            Self::set_thumbnail(&mut tx, deal_id, poster_id, image_url).await?;
        }

        tx.commit().await?;
        tracing::info!("Deal {} posted by {}", deal_id, poster_id);
        Ok(deal_id)
    }

    /// Only the poster may update. Required columns keep their value when
    /// omitted; optional columns omitted from the body are reset to null.
    pub async fn update(&self, deal_id: Uuid, poster_id: Uuid, input: &DealInput) -> Result<Uuid, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            "UPDATE deals SET \
             title = COALESCE($1, title), \
             description = COALESCE($2, description), \
             category_id = COALESCE($3, category_id), \
             country_code = COALESCE($4, country_code), \
             latitude = $5, longitude = $6, point = {}, \
             location_text = $7, total_price = $8, quantity = $9, benefits = $10, \
             thumbnail_id = $11, updated_at = now() \
             WHERE id = $12 AND poster_id = $13 RETURNING id",
            point_sql("$5", "$6")
        );
        let updated: Option<(Uuid,)> = sqlx::query_as(&query)
            .bind(input.title.as_deref())
            .bind(input.description.as_deref())
            .bind(input.category_id)
            .bind(input.country_code.as_deref())
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.location_text.as_deref())
            .bind(input.total_price)
            .bind(input.quantity)
            .bind(input.benefits.as_deref())
            .bind(input.thumbnail_id)
            .bind(deal_id)
            .bind(poster_id)
            .fetch_optional(&mut *tx)
            .await?;

        if updated.is_none() {
            return Err(DatabaseError::NotFound("Deal not found".to_string()));
        }

        if let Some(image_url) = input.image_url.as_deref() {
            Self::set_thumbnail(&mut tx, deal_id, poster_id, image_url).await?;
        }

        tx.commit().await?;
        Ok(deal_id)
    }

    async fn set_thumbnail(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        deal_id: Uuid,
        poster_id: Uuid,
        image_url: &str,
    ) -> Result<(), DatabaseError> {
        let (image_id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO deal_images (deal_id, poster_id, image_url) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(deal_id)
        .bind(poster_id)
        .bind(image_url)
        .fetch_one(&mut **tx)
        .await?;

        sqlx::query("UPDATE deals SET thumbnail_id = $1 WHERE id = $2")
            .bind(image_id)
            .bind(deal_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Soft delete; the row is never removed.
    pub async fn deactivate(&self, deal_id: Uuid, poster_id: Uuid) -> Result<(), DatabaseError> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            "UPDATE deals SET inactive_at = now() \
             WHERE id = $1 AND poster_id = $2 AND inactive_at IS NULL RETURNING id",
        )
        .bind(deal_id)
        .bind(poster_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound("Deal not found".to_string()))
    }

    pub async fn hide(&self, deal_id: Uuid, user_id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO deal_hidden (user_id, deal_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, deal_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(deal_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn unhide(&self, deal_id: Uuid, user_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM deal_hidden WHERE user_id = $1 AND deal_id = $2")
            .bind(user_id)
            .bind(deal_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Deal is not hidden".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_uses_longitude_first() {
        assert_eq!(
            point_sql("$6", "$7"),
            "CASE WHEN $6::float8 IS NULL OR $7::float8 IS NULL THEN NULL \
             ELSE ST_SetSRID(ST_MakePoint($7, $6), 4326)::geography END"
        );
    }
}
