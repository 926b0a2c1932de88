//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PostStore, UserStore};
use quill_core::service::{PostService, ProfileService};
use quill_infra::{MemoryPostStore, MemoryUserStore};

use crate::config::AppConfig;

/// Shared application state: the post and profile services, wired to
/// whichever store the configuration provides.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub profiles: ProfileService,
}

impl AppState {
    /// Build the application state with appropriate store implementations.
    ///
    /// With `DATABASE_URL` set (and the `postgres` feature), posts live in
    /// Postgres; otherwise everything runs against the in-memory store, which
    /// honors the same conditional-insert contract.
    pub async fn new(config: &AppConfig) -> Self {
        let (post_store, user_store) = Self::stores(config).await;

        Self {
            posts: PostService::new(post_store),
            profiles: ProfileService::new(user_store),
        }
    }

    #[cfg(feature = "postgres")]
    async fn stores(config: &AppConfig) -> (Arc<dyn PostStore>, Arc<dyn UserStore>) {
        use quill_infra::store::{PgPostStore, PgUserStore, connect};

        if let Some(db_config) = &config.database {
            match connect(db_config).await {
                Ok(conn) => {
                    tracing::info!("Using Postgres document store");
                    return (
                        Arc::new(PgPostStore::new(conn.clone())),
                        Arc::new(PgUserStore::new(conn)),
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        Self::memory_stores()
    }

    #[cfg(not(feature = "postgres"))]
    async fn stores(_config: &AppConfig) -> (Arc<dyn PostStore>, Arc<dyn UserStore>) {
        tracing::info!("Running without postgres feature - using in-memory store");
        Self::memory_stores()
    }

    fn memory_stores() -> (Arc<dyn PostStore>, Arc<dyn UserStore>) {
        (
            Arc::new(MemoryPostStore::new()),
            Arc::new(MemoryUserStore::new()),
        )
    }
}
