use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ats::normalizer::dedup_skills;
use crate::errors::AppError;

fn default_minimum_ats_score() -> f64 {
    50.0
}

/// What a job demands: the scoring rubric for one evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequirement {
    pub job_title: String,
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    /// Free-form ordinal label, e.g. "Bachelor's".
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default)]
    pub years_of_experience: Option<i32>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_minimum_ats_score")]
    pub minimum_ats_score: f64,
}

impl JobRequirement {
    /// Rejects a rubric that cannot be scored. Runs before any résumé is touched.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.job_title.trim().is_empty() {
            return Err(AppError::Validation("job_title is required".to_string()));
        }
        if dedup_skills(&self.required_skills).is_empty() {
            return Err(AppError::Validation(
                "required_skills must contain at least one skill".to_string(),
            ));
        }
        if let Some(years) = self.years_of_experience {
            if years < 0 {
                return Err(AppError::Validation(format!(
                    "years_of_experience must be non-negative, got {years}"
                )));
            }
        }
        if !self.minimum_ats_score.is_finite() || !(0.0..=100.0).contains(&self.minimum_ats_score)
        {
            return Err(AppError::Validation(format!(
                "minimum_ats_score must be within [0, 100], got {}",
                self.minimum_ats_score
            )));
        }
        Ok(())
    }
}

/// Exactly one way of supplying the résumé.
#[derive(Debug, Clone, PartialEq)]
pub enum ResumeSource {
    Text(String),
    Stored(Uuid),
}

impl ResumeSource {
    /// Builds the variant from the two optional wire fields.
    /// Whitespace-only text counts as absent.
    pub fn from_parts(text: Option<String>, id: Option<Uuid>) -> Result<Self, AppError> {
        let text = text.filter(|t| !t.trim().is_empty());
        match (text, id) {
            (Some(text), None) => Ok(ResumeSource::Text(text)),
            (None, Some(id)) => Ok(ResumeSource::Stored(id)),
            (None, None) => Err(AppError::Validation(
                "Either resume_text or resume_id must be provided".to_string(),
            )),
            (Some(_), Some(_)) => Err(AppError::Validation(
                "Provide resume_text or resume_id, not both".to_string(),
            )),
        }
    }
}
