//! Document store adapters.

mod memory;

pub use memory::{MemoryPostStore, MemoryUserStore};

#[cfg(feature = "postgres")]
mod connections;
#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, connect};
#[cfg(feature = "postgres")]
pub use postgres::{PgPostStore, PgUserStore};
