//! Solar ROI API
//!
//! Axum-based API with routes and middleware for the solar ROI service.

pub mod handlers;
pub mod rate_limit;
pub mod router;
pub mod security;
pub mod state;

pub use rate_limit::{with_rate_limit, RequestRateLimiter};
pub use router::create_router;
pub use state::AppState;

#[cfg(feature = "openapi")]
pub mod openapi;
