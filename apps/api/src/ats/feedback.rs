//! Rejection feedback and verdict messages. Deterministic, derived only from the scorecard.

use serde::{Deserialize, Serialize};

use crate::ats::education::EducationLevel;
use crate::ats::EvaluationResult;

/// Dimensions at or above this count as strengths.
const STRENGTH_THRESHOLD: f64 = 80.0;
/// Dimensions below this count as weaknesses and rejection reasons.
const WEAKNESS_THRESHOLD: f64 = 50.0;
const MAX_SKILL_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RejectionFeedback {
    pub ats_score: f64,
    pub minimum_required_score: f64,
    pub rejection_reasons: Vec<String>,
    pub missing_critical_skills: Vec<String>,
    pub resume_strengths: Vec<String>,
    pub resume_weaknesses: Vec<String>,
    pub improvement_recommendations: Vec<String>,
    pub format_issues: Vec<String>,
}

/// Scoring details that are not part of the persisted record.
pub struct FeedbackInputs<'a> {
    pub missing_keywords: &'a [String],
    pub format_issues: &'a [String],
    pub education_level: Option<&'a str>,
    pub years_of_experience: Option<i32>,
}

/// `None` when the evaluation passed.
pub fn build_feedback(result: &EvaluationResult, inputs: &FeedbackInputs<'_>) -> Option<RejectionFeedback> {
    if result.passed {
        return None;
    }

    let dimensions = [
        ("Skill match", result.skill_match_score),
        ("Education", result.education_score),
        ("Experience", result.experience_score),
        ("Keyword match", result.keyword_match_score),
        ("Resume format", result.format_score),
    ];

    let mut rejection_reasons = vec![format!(
        "ATS score {:.2}% is below the required {:.2}%",
        result.ats_score, result.minimum_ats_score
    )];
    let mut resume_strengths = Vec::new();
    let mut resume_weaknesses = Vec::new();

    for (name, score) in dimensions {
        if score >= STRENGTH_THRESHOLD {
            resume_strengths.push(format!("{name} is strong ({score:.0}/100)"));
        } else if score < WEAKNESS_THRESHOLD {
            resume_weaknesses.push(format!("{name} is weak ({score:.0}/100)"));
            rejection_reasons.push(format!("{name} scored {score:.0}/100"));
        }
    }

    let mut improvement_recommendations: Vec<String> = result
        .missing_skills
        .iter()
        .take(MAX_SKILL_RECOMMENDATIONS)
        .map(|skill| format!("Gain and highlight experience with {skill}"))
        .collect();

    if result.education_score < WEAKNESS_THRESHOLD {
        if let Some(level) = inputs.education_level.filter(|l| !l.trim().is_empty()) {
            let level = EducationLevel::parse(level).map_or(level.trim(), |l| l.label());
            improvement_recommendations.push(format!(
                "State your education clearly; this role asks for {level}"
            ));
        }
    }
    if result.experience_score < 100.0 {
        if let Some(years) = inputs.years_of_experience {
            improvement_recommendations.push(format!(
                "Make your years of experience explicit (e.g. \"{years} years\"); this role asks for {years}"
            ));
        }
    }
    if !inputs.missing_keywords.is_empty() {
        improvement_recommendations.push(format!(
            "Work these keywords into your resume where accurate: {}",
            inputs.missing_keywords.join(", ")
        ));
    }

    Some(RejectionFeedback {
        ats_score: result.ats_score,
        minimum_required_score: result.minimum_ats_score,
        rejection_reasons,
        missing_critical_skills: result.missing_skills.clone(),
        resume_strengths,
        resume_weaknesses,
        improvement_recommendations,
        format_issues: inputs.format_issues.to_vec(),
    })
}

/// Human-readable verdict shown alongside the score.
pub fn verdict_message(ats_score: f64, minimum_ats_score: f64, passed: bool) -> String {
    if passed {
        format!("Candidate PASSED! ATS Score: {ats_score:.2}% (Minimum Required: {minimum_ats_score:.2}%).")
    } else {
        format!(
            "Candidate rejected. ATS Score: {ats_score:.2}% (Minimum Required: {minimum_ats_score:.2}%). Feedback provided."
        )
    }
}
