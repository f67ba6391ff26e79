use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Account, NewAccount, PublicUser, UserUpdate};

const ACCOUNT_COLUMNS: &str = "id, display_name, image_url, country_code, email, auth_type";

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: Uuid) -> Result<PublicUser, DatabaseError> {
        sqlx::query_as::<_, PublicUser>(
            "SELECT id, display_name, image_url, country_code FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound("User not found".to_string()))
    }

    /// Account behind a verified email, banned or not.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DatabaseError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", ACCOUNT_COLUMNS);
        let account = sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    /// Inserts a verified registration. A taken email surfaces as a unique
    /// violation.
    pub async fn create(&self, account: &NewAccount) -> Result<Account, DatabaseError> {
        let query = format!(
            "INSERT INTO users (email, display_name, image_url, auth_type, country_code) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            ACCOUNT_COLUMNS
        );
        let created = sqlx::query_as::<_, Account>(&query)
            .bind(&account.email)
            .bind(&account.display_name)
            .bind(account.image_url.as_deref())
            .bind(account.auth_type.as_str())
            .bind(&account.country_code)
            .fetch_one(&self.pool)
            .await?;
        tracing::info!("Registered user {} via {}", created.id, account.auth_type.as_str());
        Ok(created)
    }

    /// Expects a validated update. An absent image keeps the current one.
    pub async fn update(&self, user_id: Uuid, update: &UserUpdate) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE users SET display_name = $1, country_code = $2, \
             image_url = COALESCE($3, image_url) WHERE id = $4",
        )
        .bind(&update.display_name)
        .bind(&update.country_code)
        .bind(update.image_url.as_deref())
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    pub async fn block(&self, user_id: Uuid, blocked_id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO users_blocked (user_id, blocked_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, blocked_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(blocked_id)
        .execute(&self.pool)
        .await?;
        tracing::info!("User {} blocked {}", user_id, blocked_id);
        Ok(())
    }

    pub async fn unblock(&self, user_id: Uuid, blocked_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM users_blocked WHERE user_id = $1 AND blocked_id = $2")
            .bind(user_id)
            .bind(blocked_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("User is not blocked".to_string()));
        }
        Ok(())
    }

    pub async fn report(&self, reporter_id: Uuid, reported_id: Uuid, reason: &str) -> Result<Uuid, DatabaseError> {
        let (report_id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO users_reported (reporter_id, reported_id, reason) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(reporter_id)
        .bind(reported_id)
        .bind(reason)
        .fetch_one(&self.pool)
        .await?;
        tracing::warn!("User {} reported {} ({})", reporter_id, reported_id, report_id);
        Ok(report_id)
    }

    pub async fn is_banned(&self, user_id: Uuid) -> Result<bool, DatabaseError> {
        let (banned,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users_banned WHERE user_id = $1)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(banned)
    }
}
