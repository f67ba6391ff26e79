use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{LikeSummary, UserLike};

pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn summary(&self, deal_id: Uuid) -> Result<LikeSummary, DatabaseError> {
        let summary = sqlx::query_as::<_, LikeSummary>(
            "SELECT COUNT(*) FILTER (WHERE is_upvote) AS up_votes, \
             COUNT(*) FILTER (WHERE NOT is_upvote) AS down_votes \
             FROM deal_likes WHERE deal_id = $1",
        )
        .bind(deal_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }

    pub async fn user_like(&self, deal_id: Uuid, user_id: Uuid) -> Result<UserLike, DatabaseError> {
        let row: Option<(Option<bool>,)> =
            sqlx::query_as("SELECT is_upvote FROM deal_likes WHERE deal_id = $1 AND user_id = $2")
                .bind(deal_id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(UserLike {
            is_upvote: row.and_then(|(vote,)| vote),
        })
    }

    /// Inserts or replaces the user's vote.
    pub async fn vote(&self, deal_id: Uuid, user_id: Uuid, is_upvote: bool) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO deal_likes (user_id, deal_id, is_upvote) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, deal_id) DO UPDATE SET is_upvote = EXCLUDED.is_upvote",
        )
        .bind(user_id)
        .bind(deal_id)
        .bind(is_upvote)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Keeps the row but clears the vote.
    pub async fn clear(&self, deal_id: Uuid, user_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE deal_likes SET is_upvote = NULL WHERE user_id = $1 AND deal_id = $2")
            .bind(user_id)
            .bind(deal_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Like not found".to_string()));
        }
        Ok(())
    }
}
