pub mod comment_service;
pub mod deal_service;
pub mod image_service;
pub mod like_service;
pub mod membership_service;
pub mod suggestion_service;
pub mod user_service;

pub use comment_service::CommentService;
pub use deal_service::DealService;
pub use image_service::ImageService;
pub use like_service::LikeService;
pub use membership_service::MembershipService;
pub use suggestion_service::SuggestionService;
pub use user_service::UserService;
