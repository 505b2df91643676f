use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Immutable audit record of one completed scoring run.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Evaluation {
    pub id: i64,
    pub application_id: Option<i64>,
    /// Written out-of-band by the feedback service; always NULL on insert.
    pub feedback_id: Option<String>,
    pub job_title: String,
    pub minimum_ats_score: f64,
    pub ats_score: f64,
    pub passed: bool,
    pub skill_match_score: f64,
    pub education_score: f64,
    pub experience_score: f64,
    pub keyword_match_score: f64,
    pub format_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct EvaluationStats {
    pub total: i64,
    pub passed: i64,
    pub average_ats_score: f64,
}
