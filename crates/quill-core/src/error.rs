//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures surfaced by the services.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Post not found: {slug}")]
    NotFound { slug: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("A post with this title already exists")]
    Duplicate(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Document-store-level errors.
///
/// The adapter does not distinguish transient from permanent failures;
/// everything the store client reports comes back as `Connection` or `Query`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Store query failed: {0}")]
    Query(String),

    #[error("Record not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
