use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A deal as returned by the listing and single-deal reads. `likes` and
/// `members` are computed at read time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,
    pub category_id: i32,
    pub poster_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    pub posted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_url: Option<String>,
    pub is_featured: bool,
    pub likes: i64,
    pub members: i64,
}

/// Body of deal create and update requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub country_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_text: Option<String>,
    pub total_price: Option<f32>,
    pub quantity: Option<i32>,
    pub benefits: Option<String>,
    pub thumbnail_id: Option<Uuid>,
    pub image_url: Option<String>,
}
