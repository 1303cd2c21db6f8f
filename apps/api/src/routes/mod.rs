pub mod health;
pub mod ui;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(ui::index))
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/analyze/upload",
            post(handlers::handle_analyze_upload),
        )
        .route("/api/v1/extract", post(handlers::handle_extract))
        .layer(upload_limit)
        .with_state(state)
}
