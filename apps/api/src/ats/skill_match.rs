//! Skill-Match Scorer: required/preferred hit ratios plus the matched/missing breakdown.

use crate::ats::matcher::SkillMatcher;
use crate::ats::normalizer::{NormalizedText, Skill};

/// Share of the skill score carried by required skills when preferred skills are declared.
const REQUIRED_SHARE: f64 = 0.75;
const PREFERRED_SHARE: f64 = 0.25;

#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatch {
    pub score: f64,
    /// Matched required skills (requirement order), then matched preferred skills.
    pub matched: Vec<String>,
    /// Required skills not found, in requirement order.
    pub missing: Vec<String>,
}

/// `required` must be non-empty and deduplicated; `preferred` must not repeat a required skill.
pub fn score_skills(
    resume: &NormalizedText,
    required: &[Skill],
    preferred: &[Skill],
    matcher: &dyn SkillMatcher,
) -> SkillMatch {
    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for skill in required {
        if matcher.is_present(resume, skill) {
            matched.push(skill.label.clone());
        } else {
            missing.push(skill.label.clone());
        }
    }
    let required_hits = matched.len();

    let mut preferred_hits = 0;
    for skill in preferred {
        if matcher.is_present(resume, skill) {
            matched.push(skill.label.clone());
            preferred_hits += 1;
        }
    }

    let required_ratio = ratio(required_hits, required.len());
    let score = if preferred.is_empty() {
        required_ratio * 100.0
    } else {
        let preferred_ratio = ratio(preferred_hits, preferred.len());
        REQUIRED_SHARE * required_ratio * 100.0 + PREFERRED_SHARE * preferred_ratio * 100.0
    };

    SkillMatch {
        score: score.clamp(0.0, 100.0),
        matched,
        missing,
    }
}

fn ratio(hits: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
