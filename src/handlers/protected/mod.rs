// handlers/protected/mod.rs - writes that need a session
//
// Handlers take `SessionUser`, which rejects with 401 when the session
// middleware found no valid cookie. Bodies that name a user must name the
// session user.

pub mod comments;
pub mod deals;
pub mod hidden;
pub mod images;
pub mod likes;
pub mod memberships;
pub mod users;

pub use comments::{comment_add, comment_edit, comment_remove};
pub use deals::{deal_create, deal_delete, deal_update};
pub use hidden::{deal_hide, deal_unhide};
pub use images::{image_add, image_remove};
pub use likes::{like_clear, like_vote};
pub use memberships::{membership_join, membership_leave};
pub use users::{logout, user_banned, user_block, user_report, user_unblock, user_update};
