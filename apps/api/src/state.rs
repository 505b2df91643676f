use std::sync::Arc;

use crate::evaluation::service::Evaluator;
use crate::stores::evaluations::EvaluationStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Single and batch scoring. Owns the résumé, evaluation and badge collaborators.
    pub evaluator: Evaluator,
    /// Read side of the Evaluation Store, for lookups and stats.
    pub evaluations: Arc<dyn EvaluationStore>,
}
