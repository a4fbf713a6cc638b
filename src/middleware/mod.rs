//! HTTP middleware

pub mod maintenance;
pub mod rate_limit;

pub use maintenance::maintenance;
pub use rate_limit::{rate_limit, RateLimitState};
