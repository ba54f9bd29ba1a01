use log::{ debug, info };
use serde::{ Deserialize, Serialize };

use crate::implementations::normalizer::{ contains_term, normalize };
use crate::models::article::ScoredArticle;
use crate::models::verdict::{ Verdict, VerdictLabel };

/// Threshold table mapping a similarity distribution to a verdict.
///
/// The defaults reproduce the hand-picked cutpoints of the sentence-embedding
/// prototype. They are not calibrated against any labelled data and are meant
/// to be tuned through the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdictPolicy {
    /// Max similarity at or below this means nothing semantically related was found
    pub floor_similarity: f32,
    pub floor_confidence: f32,

    /// Max similarity above this, with enough corroboration, reads as support
    pub strong_similarity: f32,
    /// Articles above this count as corroborating matches
    pub high_similarity: f32,
    /// Corroborating matches required (capped by the number of articles retrieved)
    pub min_high_matches: usize,
    pub strong_bonus: f32,
    pub confidence_cap: f32,

    pub moderate_similarity: f32,
    pub moderate_scale: f32,

    pub weak_similarity: f32,
    pub medium_low: f32,
    pub medium_high: f32,
    pub min_medium_matches: usize,
    pub weak_scale: f32,

    pub false_base: f32,
    pub false_gap_scale: f32,

    /// How many of the best-ranked corroborating articles are scanned for refutation terms
    pub contradiction_top_n: usize,
    pub contradiction_damping: f32,
    pub contradiction_terms: Vec<String>,
}

impl Default for VerdictPolicy {
    fn default() -> Self {
        Self {
            floor_similarity: 0.0,
            floor_confidence: 0.1,
            strong_similarity: 0.7,
            high_similarity: 0.5,
            min_high_matches: 2,
            strong_bonus: 0.1,
            confidence_cap: 0.9,
            moderate_similarity: 0.6,
            moderate_scale: 0.8,
            weak_similarity: 0.4,
            medium_low: 0.3,
            medium_high: 0.5,
            min_medium_matches: 2,
            weak_scale: 0.6,
            false_base: 0.3,
            false_gap_scale: 0.5,
            contradiction_top_n: 3,
            contradiction_damping: 0.7,
            contradiction_terms: [
                "not",
                "never",
                "false",
                "denies",
                "refutes",
                "contrary",
                "opposite",
                "hoax",
                "debunked",
                "misleading",
                "fake",
            ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl VerdictPolicy {
    /// Check that the cutpoints are ordered and the factors are usable
    pub fn validate(&self) -> Result<(), String> {
        let unit = [
            ("floor_confidence", self.floor_confidence),
            ("confidence_cap", self.confidence_cap),
            ("moderate_scale", self.moderate_scale),
            ("weak_scale", self.weak_scale),
            ("false_base", self.false_base),
            ("contradiction_damping", self.contradiction_damping),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be within [0, 1], got {}", name, value));
            }
        }
        if self.medium_low > self.medium_high {
            return Err(format!(
                "medium_low ({}) must not exceed medium_high ({})",
                self.medium_low,
                self.medium_high
            ));
        }
        if self.weak_similarity > self.moderate_similarity || self.moderate_similarity > self.strong_similarity {
            return Err(
                "similarity cutpoints must satisfy weak <= moderate <= strong".to_string()
            );
        }
        Ok(())
    }
}

/// Map ranked similarity scores to a verdict.
///
/// `ranked` must already be sorted by descending similarity. The function is
/// pure: identical input always yields an identical verdict.
pub fn classify(policy: &VerdictPolicy, ranked: &[ScoredArticle]) -> Verdict {
    if ranked.is_empty() {
        return Verdict::new(
            VerdictLabel::Unverified,
            0.0,
            "No recent news found related to this claim. Unable to verify."
        );
    }

    let max_similarity = ranked
        .iter()
        .map(|a| a.similarity)
        .fold(f32::NEG_INFINITY, f32::max);

    if max_similarity <= policy.floor_similarity {
        return Verdict::new(
            VerdictLabel::Unverified,
            policy.floor_confidence,
            "No semantically similar news found. This claim may be unverified or relates to very recent events not yet covered by major news sources."
        );
    }

    let high_matches = ranked
        .iter()
        .filter(|a| a.similarity > policy.high_similarity)
        .count();
    let medium_matches = ranked
        .iter()
        .filter(|a| a.similarity >= policy.medium_low && a.similarity <= policy.medium_high)
        .count();
    let required_high = policy.min_high_matches.min(ranked.len()).max(1);

    debug!(
        "Classifying: max={:.3}, high_matches={}, medium_matches={}, articles={}",
        max_similarity,
        high_matches,
        medium_matches,
        ranked.len()
    );

    let (mut label, mut confidence, mut summary) = if
        max_similarity > policy.strong_similarity &&
        high_matches >= required_high
    {
        (
            VerdictLabel::LikelyTrue,
            (max_similarity + policy.strong_bonus).min(policy.confidence_cap),
            format!(
                "Found {} highly similar news reports supporting this claim. The highest similarity score was {}.",
                high_matches,
                percent(max_similarity)
            ),
        )
    } else if max_similarity > policy.moderate_similarity {
        (
            VerdictLabel::PossiblyTrue,
            max_similarity * policy.moderate_scale,
            format!(
                "Found some news reports with moderate similarity to this claim. The highest similarity score was {}. Verification recommended.",
                percent(max_similarity)
            ),
        )
    } else if
        max_similarity > policy.weak_similarity &&
        medium_matches >= policy.min_medium_matches
    {
        (
            VerdictLabel::Unverified,
            max_similarity * policy.weak_scale,
            "Found some related news but with lower similarity scores. This claim requires further investigation.".to_string(),
        )
    } else {
        let confidence = if max_similarity < policy.weak_similarity {
            policy.false_base + (policy.weak_similarity - max_similarity) * policy.false_gap_scale
        } else {
            policy.false_base
        };
        (
            VerdictLabel::LikelyFalse,
            confidence,
            "No highly similar news reports found. The claim may be false or unsubstantiated based on current news sources.".to_string(),
        )
    };

    if label == VerdictLabel::LikelyTrue {
        if let Some(hit) = find_contradiction(policy, ranked) {
            info!("Top-ranked coverage contains refutation term '{}', downgrading verdict", hit);
            label = VerdictLabel::ContradictoryReports;
            confidence *= policy.contradiction_damping;
            summary.push_str(" However, some sources may contradict this claim.");
        }
    }

    Verdict::new(label, confidence, summary)
}

/// Returns the first refutation term found in the top-ranked corroborating articles
fn find_contradiction(policy: &VerdictPolicy, ranked: &[ScoredArticle]) -> Option<String> {
    ranked
        .iter()
        .filter(|scored| scored.similarity > policy.high_similarity)
        .take(policy.contradiction_top_n)
        .find_map(|scored| {
            let text = normalize(&scored.article.text());
            policy.contradiction_terms
                .iter()
                .find(|term| contains_term(&text, term))
                .cloned()
        })
}

fn percent(value: f32) -> String {
    format!("{:.1}%", value * 100.0)
}
