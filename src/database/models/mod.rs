pub mod category;
pub mod comment;
pub mod deal;
pub mod like;
pub mod membership;
pub mod suggestion;
pub mod user;

pub use category::DealCategory;
pub use comment::DealComment;
pub use deal::{Deal, DealInput};
pub use like::{LikeSummary, UserLike};
pub use membership::DealMember;
pub use suggestion::Suggestion;
pub use user::{Account, AuthType, NewAccount, PublicUser, UserUpdate};
