//! Application configuration loaded from environment variables.

use std::env;

use blog_infra::store::MEMORY_SCHEME;

/// Listener and pool settings for the lifecycle controller.
///
/// The database URL is deliberately not part of this; it is passed to
/// [`ServerController::run_server`](crate::lifecycle::ServerController::run_server)
/// so the same settings can serve the production and the test database.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    /// `0` binds any free port.
    pub port: u16,
    /// Worker threads; `None` uses actix-web's default (one per core).
    pub workers: Option<usize>,
    /// Seconds to wait for in-flight requests on graceful shutdown.
    pub shutdown_timeout: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
}

impl ServerConfig {
    /// Loopback, any free port, a single worker. Used by test harnesses.
    pub fn ephemeral() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            workers: Some(1),
            shutdown_timeout: 1,
            db_max_connections: 5,
            db_min_connections: 1,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database_url: String,
    pub test_database_url: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            MEMORY_SCHEME.to_string()
        });

        Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_var("PORT").unwrap_or(8080),
                workers: parse_var("WORKERS"),
                shutdown_timeout: parse_var("SHUTDOWN_TIMEOUT").unwrap_or(30),
                db_max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
                db_min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
            },
            database_url,
            test_database_url: env::var("TEST_DATABASE_URL")
                .unwrap_or_else(|_| format!("{}test", MEMORY_SCHEME)),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
