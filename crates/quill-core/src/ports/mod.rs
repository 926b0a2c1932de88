//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod rate_limit;
mod store;

pub use auth::{AuthError, IdentityClaims, TokenVerifier};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use store::{PostStore, UserStore};
