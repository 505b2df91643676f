//! Axum route handlers for the ATS scoring API.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ats::feedback::{verdict_message, RejectionFeedback};
use crate::errors::AppError;
use crate::evaluation::batch::BatchInput;
use crate::evaluation::service::{EvaluationOutcome, ScoreRequest};
use crate::models::evaluation::{Evaluation, EvaluationStats};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct AtsScoreResponse {
    pub evaluation_id: i64,
    pub ats_score: f64,
    pub passed: bool,
    pub skill_match_score: f64,
    pub education_score: f64,
    pub experience_score: f64,
    pub keyword_match_score: f64,
    pub format_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<RejectionFeedback>,
}

impl From<EvaluationOutcome> for AtsScoreResponse {
    fn from(outcome: EvaluationOutcome) -> Self {
        let EvaluationOutcome {
            evaluation,
            feedback,
        } = outcome;
        AtsScoreResponse {
            message: verdict_message(
                evaluation.ats_score,
                evaluation.minimum_ats_score,
                evaluation.passed,
            ),
            evaluation_id: evaluation.id,
            ats_score: evaluation.ats_score,
            passed: evaluation.passed,
            skill_match_score: evaluation.skill_match_score,
            education_score: evaluation.education_score,
            experience_score: evaluation.experience_score,
            keyword_match_score: evaluation.keyword_match_score,
            format_score: evaluation.format_score,
            matched_skills: evaluation.matched_skills,
            missing_skills: evaluation.missing_skills,
            feedback,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItemResponse {
    Scored(AtsScoreResponse),
    Failed { error: String },
}

#[derive(Debug, Serialize)]
pub struct BatchScoreResponse {
    pub results: Vec<BatchItemResponse>,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub application_id: Option<i64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/score
///
/// Scores one résumé (inline text or stored id) against a job requirement.
pub async fn handle_score(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<AtsScoreResponse>, AppError> {
    let Json(request) = payload?;
    let outcome = state.evaluator.evaluate_request(request).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/ats/batch-score
///
/// Body is a JSON array of score requests. Each element is decoded on its own,
/// so one malformed element becomes an `{error}` entry rather than failing the call.
pub async fn handle_batch_score(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BatchScoreResponse>, AppError> {
    let Json(body) = payload?;
    let Value::Array(items) = body else {
        return Err(AppError::Validation(
            "batch-score body must be a JSON array of requests".to_string(),
        ));
    };

    let inputs: Vec<BatchInput> = items
        .into_iter()
        .map(|item| {
            serde_json::from_value::<ScoreRequest>(item)
                .map_err(|e| AppError::Validation(format!("invalid request: {e}")))
        })
        .collect();

    let results = state
        .evaluator
        .evaluate_batch(inputs)
        .await?
        .into_iter()
        .map(|result| match result {
            Ok(outcome) => BatchItemResponse::Scored(outcome.into()),
            Err(e) => BatchItemResponse::Failed {
                error: e.public_message(),
            },
        })
        .collect();

    Ok(Json(BatchScoreResponse { results }))
}

/// GET /api/v1/ats/evaluations/:id
pub async fn handle_get_evaluation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Evaluation>, AppError> {
    Ok(Json(state.evaluations.get(id).await?))
}

/// GET /api/v1/ats/applications/:id/evaluations
pub async fn handle_application_evaluations(
    State(state): State<AppState>,
    Path(application_id): Path<i64>,
) -> Result<Json<Vec<Evaluation>>, AppError> {
    Ok(Json(
        state.evaluations.list_for_application(application_id).await?,
    ))
}

/// GET /api/v1/ats/stats
///
/// Totals, pass count and average ATS score, optionally for one application.
pub async fn handle_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<EvaluationStats>, AppError> {
    Ok(Json(state.evaluations.stats(params.application_id).await?))
}
