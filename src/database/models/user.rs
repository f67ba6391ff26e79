use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Profile visible to other users; no auth details.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub country_code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub display_name: String,
    pub country_code: String,
    pub image_url: Option<String>,
}

/// How an account signs in; stored in `users.auth_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    Email,
    Google,
    Facebook,
}

impl AuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::Email => "email",
            AuthType::Google => "google",
            AuthType::Facebook => "facebook",
        }
    }
}

/// The signed-in user's own view, returned by login and registration.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub country_code: String,
    pub email: String,
    pub auth_type: String,
}

/// A validated registration ready to insert.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub display_name: String,
    pub country_code: String,
    pub image_url: Option<String>,
    pub auth_type: AuthType,
}
