//! Single Evaluation Service: resolve → score → persist → notify, for one request.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::ats::aggregator::AtsWeights;
use crate::ats::feedback::RejectionFeedback;
use crate::ats::matcher::SkillMatcher;
use crate::ats::requirement::{JobRequirement, ResumeSource};
use crate::ats::score_resume;
use crate::errors::AppError;
use crate::models::evaluation::Evaluation;
use crate::stores::badges::BadgeIssuer;
use crate::stores::evaluations::EvaluationStore;
use crate::stores::resumes::ResumeStore;

/// Wire shape of one scoring request. `resume_text` / `resume_id` become a `ResumeSource`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub job_requirement: JobRequirement,
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub resume_id: Option<Uuid>,
    #[serde(default)]
    pub application_id: Option<i64>,
    /// Who earns badges if this evaluation passes.
    #[serde(default)]
    pub candidate_id: Option<Uuid>,
}

/// External links recorded with (or notified about) an evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluationLinks {
    pub application_id: Option<i64>,
    pub candidate_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct EvaluationOutcome {
    pub evaluation: Evaluation,
    pub feedback: Option<RejectionFeedback>,
}

/// Limits applied to batch calls.
#[derive(Debug, Clone, Copy)]
pub struct BatchLimits {
    pub concurrency: usize,
    pub max_items: usize,
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            concurrency: 8,
            max_items: 100,
        }
    }
}

/// Upper bound on one badge notification before it is abandoned.
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(2);

/// Stateless orchestrator. All shared state lives behind the collaborator traits.
#[derive(Clone)]
pub struct Evaluator {
    pub(crate) resumes: Arc<dyn ResumeStore>,
    pub(crate) evaluations: Arc<dyn EvaluationStore>,
    pub(crate) badges: Arc<dyn BadgeIssuer>,
    pub(crate) matcher: Arc<dyn SkillMatcher>,
    pub(crate) weights: AtsWeights,
    pub(crate) limits: BatchLimits,
    pub(crate) notify_timeout: Duration,
}

impl Evaluator {
    pub fn new(
        resumes: Arc<dyn ResumeStore>,
        evaluations: Arc<dyn EvaluationStore>,
        badges: Arc<dyn BadgeIssuer>,
        matcher: Arc<dyn SkillMatcher>,
    ) -> Self {
        Self {
            resumes,
            evaluations,
            badges,
            matcher,
            weights: AtsWeights::default(),
            limits: BatchLimits::default(),
            notify_timeout: DEFAULT_NOTIFY_TIMEOUT,
        }
    }

    pub fn with_limits(mut self, limits: BatchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_notify_timeout(mut self, timeout: Duration) -> Self {
        self.notify_timeout = timeout;
        self
    }

    /// Validates the wire request, then runs `evaluate`.
    pub async fn evaluate_request(&self, request: ScoreRequest) -> Result<EvaluationOutcome, AppError> {
        request.job_requirement.validate()?;
        let source = ResumeSource::from_parts(request.resume_text, request.resume_id)?;
        let links = EvaluationLinks {
            application_id: request.application_id,
            candidate_id: request.candidate_id,
        };
        self.evaluate(source, &request.job_requirement, links).await
    }

    /// Scores one résumé against one requirement and persists the result.
    ///
    /// Nothing is persisted when validation or résumé resolution fails. When
    /// persistence fails, the computed score is discarded. Badge notification
    /// is bounded by `notify_timeout`; failures and timeouts are logged and never
    /// change the outcome.
    pub async fn evaluate(
        &self,
        source: ResumeSource,
        requirement: &JobRequirement,
        links: EvaluationLinks,
    ) -> Result<EvaluationOutcome, AppError> {
        requirement.validate()?;

        let resume_text = match source {
            ResumeSource::Text(text) => text,
            ResumeSource::Stored(resume_id) => {
                self.resumes.resolve(resume_id).await.map_err(|e| {
                    warn!("Resume {resume_id} could not be resolved: {e}");
                    e
                })?
            }
        };

        let outcome = score_resume(
            &resume_text,
            requirement,
            self.matcher.as_ref(),
            &self.weights,
        );

        let evaluation = self
            .evaluations
            .save(&outcome.result, links.application_id)
            .await?;

        info!(
            "Evaluation {} for '{}': ats_score={:.2} passed={}",
            evaluation.id, evaluation.job_title, evaluation.ats_score, evaluation.passed
        );

        if evaluation.passed {
            self.notify_badges(links.candidate_id, &evaluation).await;
        }

        Ok(EvaluationOutcome {
            evaluation,
            feedback: outcome.feedback,
        })
    }

    async fn notify_badges(&self, candidate_id: Option<Uuid>, evaluation: &Evaluation) {
        let Some(candidate_id) = candidate_id else {
            debug!(
                "Evaluation {} passed without a candidate_id; skipping badge notification",
                evaluation.id
            );
            return;
        };

        let delivery = tokio::time::timeout(
            self.notify_timeout,
            self.badges.notify_passed(candidate_id, evaluation),
        )
        .await;

        match delivery {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(
                "Badge notification for evaluation {} (candidate {candidate_id}) failed: {e}",
                evaluation.id
            ),
            Err(_) => warn!(
                "Badge notification for evaluation {} (candidate {candidate_id}) timed out after {:?}",
                evaluation.id, self.notify_timeout
            ),
        }
    }
}
