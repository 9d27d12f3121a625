//! Analysis results and verdict derivation.
//!
//! Everything here is pure: a [`ScorePair`] comes in from the classifier,
//! an [`AnalysisResult`] comes out. The id and timestamp are assigned at
//! construction and the value is immutable afterwards.

use serde::{Deserialize, Serialize};

/// Display labels for the two candidate classes, in report order.
pub const REAL_LABEL: &str = "Real (photo)";
pub const FAKE_LABEL: &str = "Fake (AI-generated)";

/// Discrete outcome of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "REAL")]
    Real,
    #[serde(rename = "FAKE")]
    Fake,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Real => "REAL",
            Verdict::Fake => "FAKE",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Joint two-way classification output. Invariant: `real + fake == 1.0`
/// (the classifier adapter normalizes before handing the pair over).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorePair {
    pub real: f64,
    pub fake: f64,
}

impl ScorePair {
    /// The winning verdict. A tie resolves to [`Verdict::Real`], the less
    /// alarming of the two.
    pub fn verdict(&self) -> Verdict {
        if self.fake > self.real {
            Verdict::Fake
        } else {
            Verdict::Real
        }
    }

    /// The winning label's probability.
    pub fn winning(&self) -> f64 {
        if self.fake > self.real { self.fake } else { self.real }
    }
}

/// One reported per-label score, as a rounded percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Round a probability to a percentage with two decimals.
///
/// Half-away-from-zero, i.e. `f64::round` on the scaled value: 0.123456
/// becomes 12.35.
pub fn round_pct(probability: f64) -> f64 {
    (probability * 10_000.0).round() / 100.0
}

/// A completed analysis, immutable once created.
///
/// Wire field names match what the browser UI expects: `result` and `label`
/// both carry the verdict, `filename` carries the source name, and
/// `all_scores` always lists Real before Fake regardless of which won.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: String,
    #[serde(rename = "filename")]
    pub source_name: String,
    pub timestamp: String,
    #[serde(rename = "result")]
    pub verdict: Verdict,
    /// Duplicate of `verdict`, kept for wire compatibility.
    pub label: Verdict,
    pub confidence: f64,
    #[serde(rename = "all_scores")]
    pub scores: Vec<LabelScore>,
}

impl AnalysisResult {
    /// Derive a result from raw model scores. The only constructor: the id
    /// (UUIDv4) and second-precision UTC timestamp are assigned here.
    pub fn from_scores(source_name: impl Into<String>, scores: ScorePair) -> Self {
        let verdict = scores.verdict();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source_name: source_name.into(),
            timestamp: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            verdict,
            label: verdict,
            confidence: round_pct(scores.winning()),
            scores: vec![
                LabelScore {
                    label: REAL_LABEL.to_string(),
                    score: round_pct(scores.real),
                },
                LabelScore {
                    label: FAKE_LABEL.to_string(),
                    score: round_pct(scores.fake),
                },
            ],
        }
    }
}
