use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;

pub struct ImageService {
    pool: PgPool,
}

impl ImageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn urls(&self, deal_id: Uuid) -> Result<Vec<String>, DatabaseError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT image_url FROM deal_images \
             WHERE deal_id = $1 AND removed_at IS NULL ORDER BY posted_at, id",
        )
        .bind(deal_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(url,)| url).collect())
    }

    pub async fn add(&self, deal_id: Uuid, poster_id: Uuid, image_url: &str) -> Result<Uuid, DatabaseError> {
        let (image_id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO deal_images (deal_id, poster_id, image_url) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(deal_id)
        .bind(poster_id)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(image_id)
    }

    /// Marks one of the poster's images removed.
    pub async fn remove(&self, image_id: Uuid, poster_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE deal_images SET removed_at = now() \
             WHERE id = $1 AND poster_id = $2 AND removed_at IS NULL",
        )
        .bind(image_id)
        .bind(poster_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Image not found".to_string()));
        }
        Ok(())
    }
}
