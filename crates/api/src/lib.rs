//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes
//! - Structured error responses
//! - Request and response types

pub mod error;
pub mod routes;

use axum::Router;
use splitpot_core::SettlementEngine;
use splitpot_shared::config::SettlementConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
///
/// Holds configuration only. Every request settles on its own accounts and
/// its own random source.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Stateless settlement engine.
    pub engine: SettlementEngine,
    /// Fixed seed for remainder allocation, if configured.
    pub seed: Option<u64>,
    /// Upper bound on contributions per request.
    pub max_participants: usize,
}

impl AppState {
    /// Builds the state from settlement configuration.
    #[must_use]
    pub fn from_config(config: &SettlementConfig) -> Self {
        Self {
            engine: SettlementEngine::new(config.currency, config.decimal_places()),
            seed: config.seed,
            max_participants: config.max_participants,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
