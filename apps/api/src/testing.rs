//! In-memory collaborator doubles shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::ats::matcher::ExactSubstringMatcher;
use crate::ats::requirement::JobRequirement;
use crate::ats::EvaluationResult;
use crate::errors::AppError;
use crate::evaluation::service::Evaluator;
use crate::models::evaluation::{Evaluation, EvaluationStats};
use crate::state::AppState;
use crate::stores::badges::BadgeIssuer;
use crate::stores::evaluations::EvaluationStore;
use crate::stores::resumes::ResumeStore;

#[derive(Default)]
pub struct InMemoryEvaluationStore {
    rows: Mutex<Vec<Evaluation>>,
    fail_saves: AtomicBool,
}

impl InMemoryEvaluationStore {
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl EvaluationStore for InMemoryEvaluationStore {
    async fn save(
        &self,
        result: &EvaluationResult,
        application_id: Option<i64>,
    ) -> Result<Evaluation, AppError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(AppError::Persistence("store unavailable".to_string()));
        }
        // id allocation and insert happen under one lock
        let mut rows = self.rows.lock().unwrap();
        let evaluation = Evaluation {
            id: rows.len() as i64 + 1,
            application_id,
            feedback_id: None,
            job_title: result.job_title.clone(),
            minimum_ats_score: result.minimum_ats_score,
            ats_score: result.ats_score,
            passed: result.passed,
            skill_match_score: result.skill_match_score,
            education_score: result.education_score,
            experience_score: result.experience_score,
            keyword_match_score: result.keyword_match_score,
            format_score: result.format_score,
            matched_skills: result.matched_skills.clone(),
            missing_skills: result.missing_skills.clone(),
            created_at: Utc::now(),
        };
        rows.push(evaluation.clone());
        Ok(evaluation)
    }

    async fn get(&self, id: i64) -> Result<Evaluation, AppError> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Evaluation {id} not found")))
    }

    async fn list_for_application(&self, application_id: i64) -> Result<Vec<Evaluation>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.application_id == Some(application_id))
            .cloned()
            .collect())
    }

    async fn stats(&self, application_id: Option<i64>) -> Result<EvaluationStats, AppError> {
        let rows = self.rows.lock().unwrap();
        let selected: Vec<&Evaluation> = rows
            .iter()
            .filter(|e| application_id.map_or(true, |id| e.application_id == Some(id)))
            .collect();
        let total = selected.len() as i64;
        let passed = selected.iter().filter(|e| e.passed).count() as i64;
        let average_ats_score = if selected.is_empty() {
            0.0
        } else {
            let mean = selected.iter().map(|e| e.ats_score).sum::<f64>() / total as f64;
            (mean * 100.0).round() / 100.0
        };
        Ok(EvaluationStats {
            total,
            passed,
            average_ats_score,
        })
    }
}

#[derive(Default)]
pub struct InMemoryResumeStore {
    texts: Mutex<HashMap<Uuid, String>>,
}

impl InMemoryResumeStore {
    pub fn insert(&self, text: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.texts.lock().unwrap().insert(id, text.to_string());
        id
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn resolve(&self, resume_id: Uuid) -> Result<String, AppError> {
        self.texts
            .lock()
            .unwrap()
            .get(&resume_id)
            .cloned()
            .ok_or_else(|| AppError::Resolution(format!("Resume {resume_id} not found")))
    }
}

#[derive(Default)]
pub struct RecordingBadgeIssuer {
    sent: Mutex<Vec<(Uuid, i64)>>,
    fail: AtomicBool,
}

impl RecordingBadgeIssuer {
    pub fn fail_notifications(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn notified(&self) -> Vec<(Uuid, i64)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl BadgeIssuer for RecordingBadgeIssuer {
    async fn notify_passed(&self, candidate_id: Uuid, evaluation: &Evaluation) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Notification("badge service unreachable".to_string()));
        }
        self.sent.lock().unwrap().push((candidate_id, evaluation.id));
        Ok(())
    }
}

/// A badge service that accepts the call and never answers.
pub struct StalledBadgeIssuer;

#[async_trait]
impl BadgeIssuer for StalledBadgeIssuer {
    async fn notify_passed(&self, _candidate_id: Uuid, _evaluation: &Evaluation) -> Result<(), AppError> {
        std::future::pending::<()>().await;
        Ok(())
    }
}

/// One set of doubles, shared between the evaluator under test and assertions.
pub struct Doubles {
    pub evaluations: Arc<InMemoryEvaluationStore>,
    pub resumes: Arc<InMemoryResumeStore>,
    pub badges: Arc<RecordingBadgeIssuer>,
}

impl Doubles {
    pub fn new() -> Self {
        Self {
            evaluations: Arc::new(InMemoryEvaluationStore::default()),
            resumes: Arc::new(InMemoryResumeStore::default()),
            badges: Arc::new(RecordingBadgeIssuer::default()),
        }
    }

    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(
            self.resumes.clone(),
            self.evaluations.clone(),
            self.badges.clone(),
            Arc::new(ExactSubstringMatcher),
        )
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            evaluator: self.evaluator(),
            evaluations: self.evaluations.clone(),
        }
    }
}

pub fn requirement(skills: &[&str], minimum_ats_score: f64) -> JobRequirement {
    JobRequirement {
        job_title: "Software Engineer".to_string(),
        required_skills: skills.iter().map(|s| s.to_string()).collect(),
        preferred_skills: vec![],
        education_level: None,
        years_of_experience: None,
        job_description: None,
        keywords: vec![],
        minimum_ats_score,
    }
}

pub fn sample_evaluation(id: i64, passed: bool) -> Evaluation {
    Evaluation {
        id,
        application_id: Some(3),
        feedback_id: None,
        job_title: "Rust Engineer".to_string(),
        minimum_ats_score: 50.0,
        ats_score: if passed { 82.5 } else { 31.0 },
        passed,
        skill_match_score: 100.0,
        education_score: 100.0,
        experience_score: 50.0,
        keyword_match_score: 100.0,
        format_score: 50.0,
        matched_skills: vec!["Rust".to_string()],
        missing_skills: vec![],
        created_at: Utc::now(),
    }
}
