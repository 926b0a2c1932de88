//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! the document store (in-memory and Postgres), the identity token
//! verifier, and the rate limiter.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory store only
//! - `postgres` - Postgres document store via SeaORM
//! - `auth` - JWT token verification
//! - `rate-limit` - Rate limiting via governor

pub mod store;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

// Re-exports - In-Memory
pub use store::{MemoryPostStore, MemoryUserStore};

#[cfg(feature = "postgres")]
pub use store::{DatabaseConfig, PgPostStore, PgUserStore, connect};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtVerifier};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
