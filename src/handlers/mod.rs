// handlers/mod.rs - route handlers by access tier
//
// Public: reads, no session required (/heartbeat, /health, /api/deals, ...)
// Protected: writes on behalf of the session user (/api/deal_*, /api/user*)

pub mod protected;
pub mod public;
pub mod validate;
