use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DealComment {
    pub id: Uuid,
    pub deal_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub comment: String,
    pub posted_at: DateTime<Utc>,
}
