use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::DealMember;

pub struct MembershipService {
    pool: PgPool,
}

impl MembershipService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Members in join order, starting strictly after `base` when given.
    pub async fn members(
        &self,
        deal_id: Uuid,
        base: Option<DateTime<Utc>>,
        limit: i64,
    ) -> Result<Vec<DealMember>, DatabaseError> {
        let members = sqlx::query_as::<_, DealMember>(
            "SELECT u.id AS user_id, u.display_name, u.image_url, m.joined_at \
             FROM users u INNER JOIN deal_memberships m ON u.id = m.user_id \
             WHERE m.deal_id = $1 AND ($2::timestamptz IS NULL OR m.joined_at > $2) \
             ORDER BY m.joined_at, u.id LIMIT $3",
        )
        .bind(deal_id)
        .bind(base)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    pub async fn is_member(&self, deal_id: Uuid, user_id: Uuid) -> Result<bool, DatabaseError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM deal_memberships WHERE deal_id = $1 AND user_id = $2)",
        )
        .bind(deal_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Joining twice is a no-op.
    pub async fn join(&self, deal_id: Uuid, user_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "INSERT INTO deal_memberships (user_id, deal_id, joined_at) VALUES ($1, $2, now()) \
             ON CONFLICT (user_id, deal_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(deal_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            tracing::info!("User {} joined deal {}", user_id, deal_id);
        }
        Ok(())
    }

    pub async fn leave(&self, deal_id: Uuid, user_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM deal_memberships WHERE user_id = $1 AND deal_id = $2")
            .bind(user_id)
            .bind(deal_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Membership not found".to_string()));
        }
        tracing::info!("User {} left deal {}", user_id, deal_id);
        Ok(())
    }
}
