//! Middleware modules.

pub mod error;

// Built on the TokenVerifier port, so it compiles with or without the
// jsonwebtoken-backed verifier.
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;
