//! Skill presence strategy.
//!
//! Default: `ExactSubstringMatcher` (exact-after-normalization, deterministic).
//! A synonym- or typo-tolerant matcher can be dropped in behind the same trait
//! without touching the dimension scorers or the aggregator.
//!
//! `Evaluator` holds an `Arc<dyn SkillMatcher>`, chosen at startup.

use crate::ats::normalizer::{NormalizedText, Skill};

pub trait SkillMatcher: Send + Sync {
    /// Whether `skill` is present in the résumé text.
    fn is_present(&self, resume: &NormalizedText, skill: &Skill) -> bool;

    /// Backend label, logged at startup.
    fn name(&self) -> &'static str;
}

/// A skill is present iff its canonical form is a substring of the normalized résumé.
pub struct ExactSubstringMatcher;

impl SkillMatcher for ExactSubstringMatcher {
    fn is_present(&self, resume: &NormalizedText, skill: &Skill) -> bool {
        resume.contains(&skill.canonical)
    }

    fn name(&self) -> &'static str {
        "exact-substring"
    }
}
