use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::DealComment;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, deal_id: Uuid) -> Result<Vec<DealComment>, DatabaseError> {
        let comments = sqlx::query_as::<_, DealComment>(
            "SELECT c.id, c.deal_id, c.user_id, u.display_name AS username, \
             c.comment_str AS comment, c.posted_at \
             FROM deal_comments c INNER JOIN users u ON u.id = c.user_id \
             WHERE c.deal_id = $1 AND c.removed_at IS NULL \
             ORDER BY c.posted_at, c.id",
        )
        .bind(deal_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    pub async fn add(&self, deal_id: Uuid, user_id: Uuid, comment: &str) -> Result<Uuid, DatabaseError> {
        let (comment_id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO deal_comments (user_id, deal_id, comment_str) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(user_id)
        .bind(deal_id)
        .bind(comment)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment_id)
    }

    /// Only the author's live comments can be edited.
    pub async fn edit(&self, comment_id: Uuid, user_id: Uuid, comment: &str) -> Result<Uuid, DatabaseError> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            "UPDATE deal_comments SET comment_str = $1 \
             WHERE id = $2 AND user_id = $3 AND removed_at IS NULL RETURNING id",
        )
        .bind(comment)
        .bind(comment_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(id,)| id)
            .ok_or_else(|| DatabaseError::NotFound("Comment not found".to_string()))
    }

    pub async fn remove(&self, comment_id: Uuid, user_id: Uuid) -> Result<Uuid, DatabaseError> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            "UPDATE deal_comments SET removed_at = now() \
             WHERE id = $1 AND user_id = $2 AND removed_at IS NULL RETURNING id",
        )
        .bind(comment_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(id,)| id)
            .ok_or_else(|| DatabaseError::NotFound("Comment not found".to_string()))
    }
}
