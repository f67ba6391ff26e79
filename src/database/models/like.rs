use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LikeSummary {
    pub up_votes: i64,
    pub down_votes: i64,
}

/// A user's vote on a deal; `None` when cleared or never cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLike {
    pub is_upvote: Option<bool>,
}
