//! # Blog Server
//!
//! Actix-web resource server for blog posts, plus the lifecycle controller
//! that owns its listener and store connection.

pub mod config;
pub mod handlers;
pub mod lifecycle;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;

pub use config::{AppConfig, ServerConfig};
pub use lifecycle::{LifecycleError, Phase, ServerController};
pub use state::AppState;
