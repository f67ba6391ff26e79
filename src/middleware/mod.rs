pub mod auth;
pub mod extract;
pub mod response;

pub use auth::{require_session_middleware, session_middleware, SessionUser};
pub use extract::ApiJson;
pub use response::{ApiResponse, ApiResult};
