//! # Quill Core
//!
//! The domain layer of the Quill blog content service.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! slug generation, the post and profile services, and the ports that the
//! document store and token verifier must implement.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;
pub mod slug;

pub use error::DomainError;
