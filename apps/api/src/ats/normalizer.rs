//! Skill Normalizer: canonical forms for skill, keyword and résumé text comparison.
//!
//! Two skills are the same skill iff their canonical forms are equal. No fuzzy
//! or synonym matching happens here: "React" and "React.js" stay distinct.

use std::collections::HashSet;

/// Case-folds, trims, and collapses internal whitespace to single spaces.
pub fn canonicalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A job-declared skill (or keyword): the author's spelling plus its canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub label: String,
    pub canonical: String,
}

/// Canonicalizes a declared list, dropping blanks and later duplicates.
/// Declaration order and the first spelling of each skill are preserved.
pub fn dedup_skills(labels: &[String]) -> Vec<Skill> {
    let mut seen = HashSet::new();
    labels
        .iter()
        .filter_map(|label| {
            let canonical = canonicalize(label);
            if canonical.is_empty() || !seen.insert(canonical.clone()) {
                return None;
            }
            Some(Skill {
                label: label.trim().to_string(),
                canonical,
            })
        })
        .collect()
}

/// Résumé text in canonical form, computed once per evaluation.
#[derive(Debug, Clone)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        NormalizedText(canonicalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Substring test; `needle` must already be canonical.
    pub fn contains(&self, needle: &str) -> bool {
        !needle.is_empty() && self.0.contains(needle)
    }

    /// Like `contains`, but the match must not sit inside a larger alphanumeric word.
    /// Used for short aliases ("ba", "ms") that would otherwise hit everywhere.
    pub fn contains_term(&self, term: &str) -> bool {
        if term.is_empty() {
            return false;
        }
        let text = self.0.as_str();
        text.match_indices(term).any(|(start, matched)| {
            let end = start + matched.len();
            let before_ok = text[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
            let after_ok = text[end..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());
            before_ok && after_ok
        })
    }
}
