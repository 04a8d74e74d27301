//! # TF-IDF Vectorizer
//!
//! File: cli/src/nlp/vectorizer.rs
//!
//! ## Overview
//!
//! Turns cleaned messages into fixed-width feature rows:
//!
//! - tokens are runs of two or more word characters (`(?u)\b\w\w+\b`),
//! - the vocabulary is indexed in sorted term order,
//! - term frequencies are raw counts,
//! - IDF is smoothed as `ln((1 + n) / (1 + df)) + 1`,
//! - each output row is L2-normalized.
//!
//! Terms never seen during fitting are ignored, so an unknown message maps
//! to an all-zero row.
//!
use crate::core::error::{ChatbotError, Result};
use anyhow::bail;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("Token pattern should be valid"));

/// TF-IDF vectorizer fitted on a fixed set of documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> column index.
    vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency for each column.
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Fit the vectorizer on training documents.
    ///
    /// Fails if no document yields a single token, since an empty vocabulary
    /// cannot represent anything.
    pub fn fit(documents: &[String]) -> Result<Self> {
        let n_documents = documents.len();
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let unique_tokens: BTreeSet<String> = Self::analyze(doc).into_iter().collect();
            for token in unique_tokens {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            bail!(ChatbotError::Training(
                "empty vocabulary; the training messages contain only stop words".to_string()
            ));
        }

        // BTreeMap iteration is sorted, so column order follows term order.
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (idx, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        Ok(Self { vocabulary, idf })
    }

    /// Transform a document into an L2-normalized TF-IDF feature vector.
    ///
    /// Terms outside the vocabulary are ignored; a document with no known
    /// terms maps to the zero vector.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut features = vec![0.0; self.vocabulary.len()];
        for token in Self::analyze(document) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                features[idx] += 1.0;
            }
        }

        for (value, idf) in features.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }
        features
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Checks internal consistency after deserialization.
    pub(crate) fn is_consistent(&self) -> bool {
        let mut columns: Vec<usize> = self.vocabulary.values().copied().collect();
        columns.sort_unstable();
        self.idf.len() == self.vocabulary.len()
            && columns.iter().enumerate().all(|(i, &col)| i == col)
            && self.idf.iter().all(|v| v.is_finite())
    }

    fn analyze(document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
