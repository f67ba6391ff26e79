// handlers/public/mod.rs - reads that need no session
//
// Listing handlers still pick up an optional session so hidden deals and
// blocked posters drop out for signed-in viewers.

pub mod auth;
pub mod comments;
pub mod deals;
pub mod health;
pub mod images;
pub mod likes;
pub mod memberships;
pub mod suggestions;
pub mod users;

pub use auth::{login, register_email, register_social, Verifier};
pub use comments::deal_comments;
pub use deals::{categories_list, deal_get, deals_list, deals_search};
pub use health::{health, heartbeat};
pub use images::deal_images;
pub use likes::{deal_like_get, deal_likes};
pub use memberships::{deal_members, deal_membership_get};
pub use suggestions::suggestions_list;
pub use users::user_get;
