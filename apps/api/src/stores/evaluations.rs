//! Evaluation Store: append-only persistence of evaluation records.
//!
//! Ids come from the store's own sequence (`BIGSERIAL` in Postgres), never from
//! in-process state, so concurrent evaluations get unique, increasing ids.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::ats::EvaluationResult;
use crate::errors::AppError;
use crate::models::evaluation::{Evaluation, EvaluationStats};

#[async_trait]
pub trait EvaluationStore: Send + Sync {
    /// Records a scorecard. Assigns `id` and `created_at`.
    /// Any failure is `AppError::Persistence`.
    async fn save(
        &self,
        result: &EvaluationResult,
        application_id: Option<i64>,
    ) -> Result<Evaluation, AppError>;

    async fn get(&self, id: i64) -> Result<Evaluation, AppError>;

    async fn list_for_application(&self, application_id: i64) -> Result<Vec<Evaluation>, AppError>;

    async fn stats(&self, application_id: Option<i64>) -> Result<EvaluationStats, AppError>;
}

pub struct PgEvaluationStore {
    pool: PgPool,
}

impl PgEvaluationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EvaluationStore for PgEvaluationStore {
    async fn save(
        &self,
        result: &EvaluationResult,
        application_id: Option<i64>,
    ) -> Result<Evaluation, AppError> {
        // Append-only: INSERT, never UPDATE
        sqlx::query_as::<_, Evaluation>(
            r#"
            INSERT INTO evaluations
                (application_id, job_title, minimum_ats_score, ats_score, passed,
                 skill_match_score, education_score, experience_score,
                 keyword_match_score, format_score, matched_skills, missing_skills)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(application_id)
        .bind(&result.job_title)
        .bind(result.minimum_ats_score)
        .bind(result.ats_score)
        .bind(result.passed)
        .bind(result.skill_match_score)
        .bind(result.education_score)
        .bind(result.experience_score)
        .bind(result.keyword_match_score)
        .bind(result.format_score)
        .bind(&result.matched_skills)
        .bind(&result.missing_skills)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Persistence(format!("failed to insert evaluation: {e}")))
    }

    async fn get(&self, id: i64) -> Result<Evaluation, AppError> {
        sqlx::query_as::<_, Evaluation>("SELECT * FROM evaluations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Evaluation {id} not found")))
    }

    async fn list_for_application(&self, application_id: i64) -> Result<Vec<Evaluation>, AppError> {
        let rows = sqlx::query_as::<_, Evaluation>(
            "SELECT * FROM evaluations WHERE application_id = $1 ORDER BY id",
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn stats(&self, application_id: Option<i64>) -> Result<EvaluationStats, AppError> {
        let stats = sqlx::query_as::<_, EvaluationStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE passed) AS passed,
                COALESCE(ROUND(AVG(ats_score)::NUMERIC, 2)::DOUBLE PRECISION, 0) AS average_ats_score
            FROM evaluations
            WHERE ($1::BIGINT IS NULL OR application_id = $1)
            "#,
        )
        .bind(application_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }
}
