use serde::{ Deserialize, Serialize };

use crate::implementations::normalizer::{ count_term, normalize };
use crate::models::article::Article;
use crate::models::report::EvidenceSignals;

/// Phrase lists scanned across retrieved coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalLexicon {
    pub support: Vec<String>,
    pub refute: Vec<String>,
    pub sensational: Vec<String>,
}

impl Default for SignalLexicon {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            support: owned(&["confirmed", "official", "report says", "announced", "statement", "verified"]),
            refute: owned(&["rumor", "false", "debunked", "not true", "hoax", "misleading"]),
            sensational: owned(&["shocking", "click here", "you won't believe", "miracle", "conspiracy"]),
        }
    }
}

/// Tally support/refute/sensational phrases over `articles`.
///
/// The posterior uses an even prior: with `s` support hits and `r` refute hits
/// it reduces to `s / (s + r)`, and to 0.5 when neither occurs.
pub fn tally(lexicon: &SignalLexicon, articles: &[Article]) -> EvidenceSignals {
    let texts: Vec<String> = articles
        .iter()
        .map(|a| normalize(&a.text()))
        .collect();

    let hits = |phrases: &[String]| -> usize {
        texts
            .iter()
            .map(|text| phrases.iter().map(|p| count_term(text, p)).sum::<usize>())
            .sum()
    };

    let support_hits = hits(&lexicon.support);
    let refute_hits = hits(&lexicon.refute);
    let sensational_hits = hits(&lexicon.sensational);

    EvidenceSignals {
        support_hits,
        refute_hits,
        sensational_hits,
        support_posterior: posterior(support_hits, refute_hits),
    }
}

fn posterior(support: usize, refute: usize) -> f32 {
    let total = support + refute;
    if total == 0 {
        return 0.5;
    }
    let prior = 0.5_f32;
    let p_support = support as f32 / total as f32;
    let p_refute = refute as f32 / total as f32;
    let denominator = p_support * prior + p_refute * (1.0 - prior);
    if denominator == 0.0 {
        return 0.5;
    }
    (p_support * prior) / denominator
}
