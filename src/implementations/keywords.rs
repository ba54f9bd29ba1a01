use std::collections::HashSet;

use once_cell::sync::Lazy;
use log::debug;
use regex::Regex;
use serde::{ Deserialize, Serialize };

static ALPHA_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-zA-Z]+\b").expect("static pattern")
});

/// English function words dropped from search queries
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "may", "me", "might", "more", "most", "must", "my", "myself", "no", "nor",
    "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves",
    "out", "over", "own", "said", "same", "says", "shall", "she", "should", "so", "some", "such",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up", "very", "was", "we",
    "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
    "would", "you", "your", "yours", "yourself", "yourselves",
];

/// Limits applied when reducing a claim to a search query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    pub max_keywords: usize,
    pub min_keyword_len: usize,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            max_keywords: 6,
            min_keyword_len: 3,
        }
    }
}

/// Reduces a free-text claim to a compact search query
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    config: KeywordConfig,
    stopwords: HashSet<String>,
}

impl KeywordExtractor {
    pub fn new(config: KeywordConfig) -> Self {
        Self {
            config,
            stopwords: STOPWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Keywords in claim order, lowercased, without stopwords or duplicates
    pub fn keywords(&self, claim: &str) -> Vec<String> {
        let lowered = claim.to_lowercase();
        let mut seen = HashSet::new();
        ALPHA_WORD.find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|word| word.len() >= self.config.min_keyword_len)
            .filter(|word| !self.stopwords.contains(*word))
            .filter(|word| seen.insert(*word))
            .take(self.config.max_keywords)
            .map(|word| word.to_string())
            .collect()
    }

    /// Search query for `claim`; falls back to the claim itself when every token is filtered.
    ///
    /// The fallback is trimmed unless that would leave nothing, so non-empty
    /// input always yields a non-empty query.
    pub fn extract_query(&self, claim: &str) -> String {
        let keywords = self.keywords(claim);
        if keywords.is_empty() {
            debug!("No keywords survived filtering, using the claim as query");
            let trimmed = claim.trim();
            return if trimmed.is_empty() { claim.to_string() } else { trimmed.to_string() };
        }
        keywords.join(" ")
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(KeywordConfig::default())
    }
}
