// ATS scoring engine: pure, deterministic résumé-vs-requirement scoring.
// No I/O here. Résumé resolution, persistence and notification live in `evaluation`.

pub mod aggregator;
pub mod education;
pub mod experience;
pub mod feedback;
pub mod format;
pub mod keywords;
pub mod matcher;
pub mod normalizer;
pub mod requirement;
pub mod skill_match;

use serde::{Deserialize, Serialize};

use crate::ats::aggregator::{aggregate, AtsWeights, DimensionScores};
use crate::ats::feedback::{build_feedback, FeedbackInputs, RejectionFeedback};
use crate::ats::matcher::SkillMatcher;
use crate::ats::normalizer::{dedup_skills, NormalizedText};
use crate::ats::requirement::JobRequirement;

/// Transient scorecard for one (résumé, requirement) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationResult {
    pub job_title: String,
    pub minimum_ats_score: f64,
    pub skill_match_score: f64,
    pub education_score: f64,
    pub experience_score: f64,
    pub keyword_match_score: f64,
    pub format_score: f64,
    pub ats_score: f64,
    pub passed: bool,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    pub result: EvaluationResult,
    pub feedback: Option<RejectionFeedback>,
}

/// Runs every dimension scorer and the aggregator.
/// The requirement must already be validated.
pub fn score_resume(
    resume_text: &str,
    requirement: &JobRequirement,
    matcher: &dyn SkillMatcher,
    weights: &AtsWeights,
) -> ScoreOutcome {
    let resume = NormalizedText::new(resume_text);

    let required = dedup_skills(&requirement.required_skills);
    let preferred: Vec<_> = dedup_skills(&requirement.preferred_skills)
        .into_iter()
        .filter(|p| !required.iter().any(|r| r.canonical == p.canonical))
        .collect();
    let keywords = dedup_skills(&requirement.keywords);

    let skills = skill_match::score_skills(&resume, &required, &preferred, matcher);
    let education_score =
        education::score_education(&resume, requirement.education_level.as_deref());
    let experience_score =
        experience::score_experience(&resume, requirement.years_of_experience);
    let keyword_match = keywords::score_keywords(&resume, &keywords, matcher);
    let format_report = format::score_format(&resume);

    let scores = DimensionScores {
        skill_match: skills.score,
        education: education_score,
        experience: experience_score,
        keyword_match: keyword_match.score,
        format: format_report.score,
    };
    let (ats_score, passed) = aggregate(&scores, weights, requirement.minimum_ats_score);

    let result = EvaluationResult {
        job_title: requirement.job_title.trim().to_string(),
        minimum_ats_score: requirement.minimum_ats_score,
        skill_match_score: scores.skill_match,
        education_score: scores.education,
        experience_score: scores.experience,
        keyword_match_score: scores.keyword_match,
        format_score: scores.format,
        ats_score,
        passed,
        matched_skills: skills.matched,
        missing_skills: skills.missing,
    };

    let feedback = build_feedback(
        &result,
        &FeedbackInputs {
            missing_keywords: &keyword_match.missing,
            format_issues: &format_report.issues,
            education_level: requirement.education_level.as_deref(),
            years_of_experience: requirement.years_of_experience,
        },
    );

    ScoreOutcome { result, feedback }
}
