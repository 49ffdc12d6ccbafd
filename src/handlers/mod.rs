pub mod extract;
pub mod health;

pub use extract::*;
pub use health::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::logging::logging_middleware;
use crate::state::AppState;

/// Build the service router over a fully constructed state.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes();

    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/extract-skills", post(extract_skills_handler))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(logging_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit))
        )
        .with_state(state)
}
