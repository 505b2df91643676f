//! Keyword-Match Scorer: share of job keywords present in the résumé.

use crate::ats::matcher::SkillMatcher;
use crate::ats::normalizer::{NormalizedText, Skill};

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordMatch {
    pub score: f64,
    /// Keywords not found, in declared order. Feeds rejection feedback.
    pub missing: Vec<String>,
}

/// No keywords means no requirement: full score.
pub fn score_keywords(
    resume: &NormalizedText,
    keywords: &[Skill],
    matcher: &dyn SkillMatcher,
) -> KeywordMatch {
    if keywords.is_empty() {
        return KeywordMatch {
            score: 100.0,
            missing: vec![],
        };
    }

    let missing: Vec<String> = keywords
        .iter()
        .filter(|kw| !matcher.is_present(resume, kw))
        .map(|kw| kw.label.clone())
        .collect();
    let found = keywords.len() - missing.len();

    KeywordMatch {
        score: (found as f64 / keywords.len() as f64 * 100.0).clamp(0.0, 100.0),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::matcher::ExactSubstringMatcher;
    use crate::ats::normalizer::dedup_skills;

    #[test]
    fn test_empty_keywords_score_full() {
        let resume = NormalizedText::new("anything");
        let result = score_keywords(&resume, &[], &ExactSubstringMatcher);
        assert_eq!(result.score, 100.0);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_keyword_ratio() {
        let resume = NormalizedText::new("Owned CI/CD and on-call for microservices");
        let keywords = dedup_skills(&[
            "microservices".to_string(),
            "CI/CD".to_string(),
            "Agile".to_string(),
            "Scrum".to_string(),
        ]);
        let result = score_keywords(&resume, &keywords, &ExactSubstringMatcher);
        assert_eq!(result.score, 50.0);
        assert_eq!(result.missing, vec!["Agile", "Scrum"]);
    }
}
