pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring
        .route("/api/v1/ats/score", post(handlers::handle_score))
        .route("/api/v1/ats/batch-score", post(handlers::handle_batch_score))
        // Evaluation records
        .route(
            "/api/v1/ats/evaluations/:id",
            get(handlers::handle_get_evaluation),
        )
        .route(
            "/api/v1/ats/applications/:id/evaluations",
            get(handlers::handle_application_evaluations),
        )
        .route("/api/v1/ats/stats", get(handlers::handle_stats))
        .with_state(state)
}
