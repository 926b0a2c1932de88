//! SeaORM entities for the document store.

pub mod post;
pub mod user;
