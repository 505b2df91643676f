//! Format Scorer: job-independent structural checks on the résumé text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ats::normalizer::NormalizedText;

/// Below this many normalized characters a résumé is treated as incomplete.
pub const MIN_RESUME_CHARS: usize = 300;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").expect("valid email regex")
});

static PHONE_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\s().-]{8,}\d").expect("valid phone regex"));

/// E.164 allows at most 15 digits; fewer than 10 is more likely a date range.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=15;

const SECTION_HEADERS: &[(&str, &[&str])] = &[
    ("experience", &["experience", "employment", "work history"]),
    ("education", &["education", "academic"]),
    ("skills", &["skills", "technical skills", "competencies"]),
];

#[derive(Debug, Clone, PartialEq)]
pub struct FormatReport {
    pub score: f64,
    /// One entry per failed check, phrased for the candidate.
    pub issues: Vec<String>,
}

pub fn score_format(resume: &NormalizedText) -> FormatReport {
    let text = resume.as_str();
    let mut checks: Vec<(bool, String)> = vec![
        (
            EMAIL_PATTERN.is_match(text),
            "No email address found in contact information".to_string(),
        ),
        (
            has_phone_number(text),
            "No phone number found in contact information".to_string(),
        ),
    ];

    for (section, headers) in SECTION_HEADERS {
        checks.push((
            headers.iter().any(|h| resume.contains_term(h)),
            format!("Missing a clearly labelled \"{section}\" section"),
        ));
    }

    checks.push((
        resume.len() >= MIN_RESUME_CHARS,
        format!("Resume looks incomplete (fewer than {MIN_RESUME_CHARS} characters)"),
    ));

    let total = checks.len();
    let passed = checks.iter().filter(|(ok, _)| *ok).count();
    let issues = checks
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, issue)| issue)
        .collect();

    FormatReport {
        score: (passed as f64 / total as f64 * 100.0).clamp(0.0, 100.0),
        issues,
    }
}

fn has_phone_number(text: &str) -> bool {
    PHONE_CANDIDATE.find_iter(text).any(|m| {
        let digits = m.as_str().chars().filter(|c| c.is_ascii_digit()).count();
        PHONE_DIGITS.contains(&digits)
    })
}
