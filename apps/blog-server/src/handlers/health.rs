//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// Health check endpoint - returns server and store status.
///
/// GET /health answers 200 when the store is reachable, 503 otherwise.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let store_up = match state.posts.count().await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            false
        }
    };

    let response = HealthResponse {
        status: if store_up { "ok" } else { "degraded" },
        store: if store_up { "up" } else { "down" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if store_up {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
