//! Omen - deterministic multi-timeframe technical-analysis scoring engine

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod types;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{Config, EngineConfig};
pub use error::{AppError, Result};
pub use services::PredictionEngine;
pub use types::*;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<PredictionEngine>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let engine = PredictionEngine::new(config.engine.clone());
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }
}

/// Build the HTTP application with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
