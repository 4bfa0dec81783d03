//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::PostRepository;
use blog_infra::store::{StoreKind, redact_url};
use blog_infra::InMemoryPostRepository;

use crate::config::ServerConfig;
use crate::lifecycle::LifecycleError;

/// Shared application state: the one open store handle.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryPostRepository::new()))
    }

    /// Open the store that `database_url` points at.
    pub async fn connect(database_url: &str, config: &ServerConfig) -> Result<Self, LifecycleError> {
        tracing::debug!(url = %redact_url(database_url), "Opening post store");

        let state = match StoreKind::from_url(database_url) {
            StoreKind::Memory => {
                tracing::info!("Using in-memory post store");
                Self::in_memory()
            }
            StoreKind::Sql => Self::connect_sql(database_url, config).await?,
        };

        tracing::info!("Application state initialized");
        Ok(state)
    }

    #[cfg(feature = "postgres")]
    async fn connect_sql(database_url: &str, config: &ServerConfig) -> Result<Self, LifecycleError> {
        use blog_infra::database::{DatabaseConfig, PostgresPostRepository, connect};
        use migration::{Migrator, MigratorTrait};

        let db_config = DatabaseConfig {
            url: database_url.to_string(),
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
        };

        let conn = connect(&db_config)
            .await
            .map_err(|e| LifecycleError::Connect(e.to_string()))?;

        Migrator::up(&conn, None)
            .await
            .map_err(|e| LifecycleError::Migration(e.to_string()))?;
        tracing::info!("Post store schema is up to date");

        Ok(Self::new(Arc::new(PostgresPostRepository::new(conn))))
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect_sql(database_url: &str, _config: &ServerConfig) -> Result<Self, LifecycleError> {
        tracing::error!("Built without the postgres feature");
        Err(LifecycleError::UnsupportedStore(redact_url(database_url)))
    }
}
