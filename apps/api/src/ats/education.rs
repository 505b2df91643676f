//! Education Scorer: ordinal degree detection, all-or-nothing credit.

use crate::ats::normalizer::{canonicalize, NormalizedText};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EducationLevel {
    HighSchool,
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

impl EducationLevel {
    /// Highest first, so detection can stop at the first hit.
    const DESCENDING: [EducationLevel; 5] = [
        EducationLevel::Doctorate,
        EducationLevel::Master,
        EducationLevel::Bachelor,
        EducationLevel::Associate,
        EducationLevel::HighSchool,
    ];

    /// Canonical aliases searched for in résumé text, matched on word boundaries.
    /// Bare "master"/"bachelor" are excluded so titles like "Scrum Master" don't count.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            EducationLevel::HighSchool => &[
                "high school",
                "highschool",
                "secondary school",
                "ged",
                "hsc",
                "12th grade",
            ],
            EducationLevel::Associate => &["associate's", "associates", "associate degree", "a.a.s."],
            EducationLevel::Bachelor => &[
                "bachelor's",
                "bachelor of",
                "bachelors",
                "b.s.",
                "b.sc",
                "bsc",
                "b.a.",
                "b.tech",
                "btech",
                "b.e.",
                "b.eng",
                "undergraduate degree",
            ],
            EducationLevel::Master => &[
                "master's",
                "master of",
                "masters",
                "m.s.",
                "m.sc",
                "msc",
                "m.a.",
                "m.tech",
                "mtech",
                "m.eng",
                "mba",
                "graduate degree",
            ],
            EducationLevel::Doctorate => &[
                "phd",
                "ph.d",
                "ph.d.",
                "doctorate",
                "doctoral",
                "doctor of philosophy",
            ],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Associate => "Associate's",
            EducationLevel::Bachelor => "Bachelor's",
            EducationLevel::Master => "Master's",
            EducationLevel::Doctorate => "PhD",
        }
    }

    /// Bare words a job's education label may use on its own ("Master", "Bachelor degree").
    fn label_word(self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "high school",
            EducationLevel::Associate => "associate",
            EducationLevel::Bachelor => "bachelor",
            EducationLevel::Master => "master",
            EducationLevel::Doctorate => "doctor",
        }
    }

    /// Maps a free-form label ("Bachelor's degree", "MSc", "Master") onto the ranking.
    pub fn parse(label: &str) -> Option<Self> {
        let text = NormalizedText::new(label);
        detect_highest(&text).or_else(|| {
            Self::DESCENDING
                .into_iter()
                .find(|level| text.contains_term(level.label_word()))
        })
    }
}

/// Highest level mentioned anywhere in the text.
pub fn detect_highest(text: &NormalizedText) -> Option<EducationLevel> {
    EducationLevel::DESCENDING
        .into_iter()
        .find(|level| level.aliases().iter().any(|alias| text.contains_term(alias)))
}

/// 100 when no level is required or the résumé meets or exceeds it, otherwise 0.
pub fn score_education(resume: &NormalizedText, required: Option<&str>) -> f64 {
    let Some(label) = required.filter(|l| !l.trim().is_empty()) else {
        return 100.0;
    };

    let met = match EducationLevel::parse(label) {
        Some(level) => detect_highest(resume).is_some_and(|found| found >= level),
        // Unranked label: fall back to a literal mention.
        None => resume.contains(&canonicalize(label)),
    };

    if met {
        100.0
    } else {
        0.0
    }
}
