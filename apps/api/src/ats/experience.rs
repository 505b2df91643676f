//! Experience Scorer: best-effort "N years" extraction, proportional credit.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ats::normalizer::NormalizedText;

static YEARS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2}(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?)\b").expect("valid years regex")
});

/// Largest "N years" figure mentioned in the résumé, if any.
pub fn extract_years(resume: &NormalizedText) -> Option<f64> {
    YEARS_PATTERN
        .captures_iter(resume.as_str())
        .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
        .fold(None, |best, years| match best {
            Some(b) if b >= years => Some(b),
            _ => Some(years),
        })
}

/// 100 when nothing is required; 0 when a requirement exists but no figure can be extracted.
pub fn score_experience(resume: &NormalizedText, required_years: Option<i32>) -> f64 {
    let Some(required) = required_years else {
        return 100.0;
    };
    if required <= 0 {
        return 100.0;
    }

    match extract_years(resume) {
        None => 0.0,
        Some(found) if found >= required as f64 => 100.0,
        Some(found) => (100.0 * found / required as f64).clamp(0.0, 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_largest_figure() {
        let resume = NormalizedText::new("3 years of Go, 7+ years of Python, 2 yrs Rust");
        assert_eq!(extract_years(&resume), Some(7.0));
    }

    #[test]
    fn test_extracts_decimal_years() {
        let resume = NormalizedText::new("Total experience: 4.5 Years");
        assert_eq!(extract_years(&resume), Some(4.5));
    }

    #[test]
    fn test_calendar_years_are_not_experience() {
        let resume = NormalizedText::new("Graduated 2015. Joined Acme in 2018.");
        assert_eq!(extract_years(&resume), None);
    }

    #[test]
    fn test_no_requirement_scores_full() {
        let resume = NormalizedText::new("fresh graduate");
        assert_eq!(score_experience(&resume, None), 100.0);
    }

    #[test]
    fn test_zero_year_requirement_scores_full() {
        let resume = NormalizedText::new("fresh graduate");
        assert_eq!(score_experience(&resume, Some(0)), 100.0);
    }

    #[test]
    fn test_no_extractable_figure_scores_zero() {
        let resume = NormalizedText::new("Seasoned engineer, long career in backend systems");
        assert_eq!(score_experience(&resume, Some(5)), 0.0);
    }

    #[test]
    fn test_meeting_requirement_scores_full() {
        let resume = NormalizedText::new("8 years building distributed systems");
        assert_eq!(score_experience(&resume, Some(5)), 100.0);
    }

    #[test]
    fn test_partial_experience_is_proportional() {
        let resume = NormalizedText::new("2 years as a developer");
        assert!((score_experience(&resume, Some(5)) - 40.0).abs() < 1e-9);
    }
}
