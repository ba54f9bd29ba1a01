use std::collections::BTreeMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use log::debug;
use regex::Regex;

use crate::errors::CheckResult;
use crate::models::common::EmbeddingMethod;
use crate::traits::text_embedder::TextEmbedder;

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\w\w+\b").expect("static pattern")
});

/// TF-IDF vectors fit jointly over one batch of texts.
///
/// Raw term counts weighted by smoothed inverse document frequency
/// `ln((1 + n) / (1 + df)) + 1`, each row L2-normalized. The vocabulary is
/// ordered, so identical batches always produce identical vectors.
#[derive(Debug, Clone, Default)]
pub struct TfIdfEmbedder;

impl TfIdfEmbedder {
    pub fn new() -> Self {
        Self
    }

    fn tokenize(text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN.find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Fit the vocabulary on `texts` and return one vector per text
    pub fn fit_transform(&self, texts: &[String]) -> Vec<Vec<f32>> {
        let documents: Vec<Vec<String>> = texts
            .iter()
            .map(|t| Self::tokenize(t))
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &documents {
            let mut unique: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
            unique.sort_unstable();
            unique.dedup();
            for token in unique {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        let vocabulary: BTreeMap<&str, usize> = document_frequency
            .keys()
            .enumerate()
            .map(|(i, token)| (*token, i))
            .collect();
        let n = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .values()
            .map(|df| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        debug!("TF-IDF vocabulary of {} terms over {} documents", vocabulary.len(), documents.len());

        documents
            .iter()
            .map(|tokens| {
                let mut row = vec![0.0_f64; vocabulary.len()];
                for token in tokens {
                    if let Some(&column) = vocabulary.get(token.as_str()) {
                        row[column] += 1.0;
                    }
                }
                for (value, weight) in row.iter_mut().zip(&idf) {
                    *value *= weight;
                }
                let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|v| *v /= norm);
                }
                row.into_iter().map(|v| v as f32).collect()
            })
            .collect()
    }
}

#[async_trait]
impl TextEmbedder for TfIdfEmbedder {
    fn method(&self) -> EmbeddingMethod {
        EmbeddingMethod::TfIdf
    }

    async fn embed(&self, texts: &[String]) -> CheckResult<Vec<Vec<f32>>> {
        Ok(self.fit_transform(texts))
    }
}
