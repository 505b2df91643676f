use serde::{Deserialize, Serialize};

/// Dimension weights for the ATS score. Must sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsWeights {
    pub skill_match: f64,
    pub education: f64,
    pub experience: f64,
    pub keyword_match: f64,
    pub format: f64,
}

impl Default for AtsWeights {
    fn default() -> Self {
        Self {
            skill_match: 0.45,
            education: 0.15,
            experience: 0.15,
            keyword_match: 0.15,
            format: 0.10,
        }
    }
}

/// The five dimension scores, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionScores {
    pub skill_match: f64,
    pub education: f64,
    pub experience: f64,
    pub keyword_match: f64,
    pub format: f64,
}

/// Weighted ATS score plus the pass/fail verdict.
/// Every input is clamped to [0, 100] before weighting, and so is the result.
pub fn aggregate(scores: &DimensionScores, weights: &AtsWeights, minimum_ats_score: f64) -> (f64, bool) {
    let ats_score = (weights.skill_match * bounded(scores.skill_match)
        + weights.education * bounded(scores.education)
        + weights.experience * bounded(scores.experience)
        + weights.keyword_match * bounded(scores.keyword_match)
        + weights.format * bounded(scores.format))
    .clamp(0.0, 100.0);

    (ats_score, ats_score >= minimum_ats_score)
}

fn bounded(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}
