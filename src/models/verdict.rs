use std::fmt;

use serde::{ Deserialize, Serialize };

/// Discrete outcome of a claim check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictLabel {
    #[serde(rename = "Likely True")]
    LikelyTrue,
    #[serde(rename = "Possibly True")]
    PossiblyTrue,
    #[serde(rename = "Unverified")]
    Unverified,
    #[serde(rename = "Likely False")]
    LikelyFalse,
    #[serde(rename = "Contradictory Reports")]
    ContradictoryReports,
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictLabel::LikelyTrue => write!(f, "Likely True"),
            VerdictLabel::PossiblyTrue => write!(f, "Possibly True"),
            VerdictLabel::Unverified => write!(f, "Unverified"),
            VerdictLabel::LikelyFalse => write!(f, "Likely False"),
            VerdictLabel::ContradictoryReports => write!(f, "Contradictory Reports"),
        }
    }
}

/// Verdict label with its confidence and a human-readable summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: VerdictLabel,
    /// Always within [0, 1]
    pub confidence: f32,
    pub summary: String,
}

impl Verdict {
    pub fn new(label: VerdictLabel, confidence: f32, summary: impl Into<String>) -> Self {
        let confidence = if confidence.is_finite() { confidence.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            label,
            confidence,
            summary: summary.into(),
        }
    }

    /// Confidence expressed as a percentage in [0, 100]
    pub fn confidence_percent(&self) -> f32 {
        self.confidence * 100.0
    }
}
