//! Identity token verification.

mod jwt;

pub use jwt::{JwtConfig, JwtVerifier};
