//! Batch Evaluation Orchestrator.
//!
//! Items run concurrently (bounded by `BatchLimits::concurrency`) but results
//! are always returned in request order, one entry per request. A failing item
//! becomes an error entry at its own position and never touches its siblings.

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::evaluation::service::{EvaluationOutcome, Evaluator, ScoreRequest};

/// One batch input: a decoded request, or the reason the item could not be decoded.
pub type BatchInput = Result<ScoreRequest, AppError>;

pub type BatchOutput = Result<EvaluationOutcome, AppError>;

impl Evaluator {
    /// Only request-level problems (empty or oversized batch) fail the whole call.
    pub async fn evaluate_batch(&self, requests: Vec<BatchInput>) -> Result<Vec<BatchOutput>, AppError> {
        if requests.is_empty() {
            return Err(AppError::Validation(
                "batch must contain at least one request".to_string(),
            ));
        }
        if requests.len() > self.limits.max_items {
            return Err(AppError::Validation(format!(
                "batch of {} requests exceeds the limit of {}",
                requests.len(),
                self.limits.max_items
            )));
        }

        let total = requests.len();
        let results: Vec<BatchOutput> = stream::iter(requests.into_iter().enumerate())
            .map(|(index, input)| async move {
                let result = match input {
                    Ok(request) => self.evaluate_request(request).await,
                    Err(e) => Err(e),
                };
                if let Err(e) = &result {
                    warn!("Batch item {index} failed: {e}");
                }
                result
            })
            .buffered(self.limits.concurrency.max(1))
            .collect()
            .await;

        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        info!("Batch evaluated: {succeeded}/{total} succeeded");

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::service::BatchLimits;
    use crate::testing::Doubles;
    use serde_json::json;
    use uuid::Uuid;

    fn item(skills: &[&str], text: &str) -> BatchInput {
        Ok(serde_json::from_value(json!({
            "job_requirement": {
                "job_title": "Engineer",
                "required_skills": skills,
                "minimum_ats_score": 40.0
            },
            "resume_text": text
        }))
        .unwrap())
    }

    #[tokio::test]
    async fn test_middle_failure_is_isolated_in_order() {
        let doubles = Doubles::new();
        let results = doubles
            .evaluator()
            .evaluate_batch(vec![
                item(&["Rust"], "Rust developer"),
                item(&[], "Rust developer"),
                item(&["Go", "Rust"], "Go developer"),
            ])
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.evaluation.matched_skills, vec!["Rust"]);
        assert!(matches!(results[1], Err(AppError::Validation(_))));
        let third = results[2].as_ref().unwrap();
        assert_eq!(third.evaluation.matched_skills, vec!["Go"]);
        assert_eq!(doubles.evaluations.len(), 2);
    }

    #[tokio::test]
    async fn test_output_preserves_order_under_concurrency() {
        let doubles = Doubles::new();
        let evaluator = doubles.evaluator().with_limits(BatchLimits {
            concurrency: 4,
            max_items: 50,
        });

        let skills = ["Rust", "Go", "Java", "Kotlin", "Scala", "Elixir", "Zig", "Swift"];
        let requests: Vec<BatchInput> = (0..24)
            .map(|i| {
                if i % 5 == 3 {
                    Err(AppError::Validation(format!("item {i} is malformed")))
                } else {
                    let skill = skills[i % skills.len()];
                    item(&[skill], &format!("{skill} engineer"))
                }
            })
            .collect();

        let results = evaluator.evaluate_batch(requests).await.unwrap();
        assert_eq!(results.len(), 24);
        for (i, result) in results.iter().enumerate() {
            if i % 5 == 3 {
                let err = result.as_ref().unwrap_err();
                assert!(err.to_string().contains(&format!("item {i}")));
            } else {
                let outcome = result.as_ref().unwrap();
                assert_eq!(outcome.evaluation.matched_skills, vec![skills[i % skills.len()]]);
            }
        }
    }

    #[tokio::test]
    async fn test_resolution_failure_is_per_item() {
        let doubles = Doubles::new();
        let known = doubles.resumes.insert("Rust, 5 years");
        let stored = |id: Uuid| -> BatchInput {
            Ok(serde_json::from_value(json!({
                "job_requirement": {"job_title": "Engineer", "required_skills": ["Rust"]},
                "resume_id": id
            }))
            .unwrap())
        };

        let results = doubles
            .evaluator()
            .evaluate_batch(vec![stored(Uuid::new_v4()), stored(known)])
            .await
            .unwrap();
        assert!(matches!(results[0], Err(AppError::Resolution(_))));
        assert!(results[1].is_ok());
    }

    #[tokio::test]
    async fn test_persistence_failure_is_per_item() {
        let doubles = Doubles::new();
        doubles.evaluations.fail_saves(true);
        let results = doubles
            .evaluator()
            .evaluate_batch(vec![item(&["Rust"], "Rust"), item(&[], "Rust")])
            .await
            .unwrap();
        assert!(matches!(results[0], Err(AppError::Persistence(_))));
        assert!(matches!(results[1], Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_empty_batch_is_request_level_error() {
        let doubles = Doubles::new();
        let err = doubles.evaluator().evaluate_batch(vec![]).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_oversized_batch_is_request_level_error() {
        let doubles = Doubles::new();
        let evaluator = doubles.evaluator().with_limits(BatchLimits {
            concurrency: 2,
            max_items: 2,
        });
        let err = evaluator
            .evaluate_batch(vec![
                item(&["Rust"], "Rust"),
                item(&["Rust"], "Rust"),
                item(&["Rust"], "Rust"),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(doubles.evaluations.len(), 0);
    }
}
