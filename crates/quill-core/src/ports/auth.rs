//! Identity verification port.
//!
//! Token issuance belongs to the external identity provider; this service
//! only verifies the bearer tokens it receives.

/// Verified claims extracted from an identity token.
#[derive(Debug, Clone)]
pub struct IdentityClaims {
    /// The provider's stable subject for this user.
    pub uid: String,
    pub email: String,
    pub name: Option<String>,
    pub exp: i64,
}

/// Token verifier trait - abstraction over the identity provider's
/// token format.
pub trait TokenVerifier: Send + Sync {
    /// Validate and decode a bearer token.
    fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}
