//! # Multinomial Naive Bayes
//!
//! File: cli/src/nlp/naive_bayes.rs
//!
//! Multinomial naive Bayes over TF-IDF features. Classes are kept in
//! ascending label order. Additive (Laplace) smoothing with `alpha` is
//! applied to the per-class feature totals, and prediction takes the class
//! with the highest joint log-likelihood; ties go to the class that sorts
//! first.
//!
use crate::core::error::{ChatbotError, Result};
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default additive smoothing.
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Fitted multinomial naive Bayes classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    /// One row per class, one column per feature.
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fits the classifier on `features` (one row per sample) and their labels.
    ///
    /// # Errors
    ///
    /// `ChatbotError::Training` if there are no samples, the row and label
    /// counts differ, rows have inconsistent widths, or fewer than two
    /// distinct labels are present.
    pub fn fit(features: &[Vec<f64>], labels: &[&str], alpha: f64) -> Result<Self> {
        if features.is_empty() {
            bail!(ChatbotError::Training("no training examples".to_string()));
        }
        if features.len() != labels.len() {
            bail!(ChatbotError::Training(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        let n_features = features[0].len();
        if features.iter().any(|row| row.len() != n_features) {
            bail!(ChatbotError::Training(
                "feature rows have different widths".to_string()
            ));
        }

        // Sum feature values and sample counts per class, in sorted class order.
        let mut per_class: BTreeMap<&str, (usize, Vec<f64>)> = BTreeMap::new();
        for (row, &label) in features.iter().zip(labels) {
            let (count, totals) = per_class
                .entry(label)
                .or_insert_with(|| (0, vec![0.0; n_features]));
            *count += 1;
            for (total, value) in totals.iter_mut().zip(row) {
                *total += value;
            }
        }
        if per_class.len() < 2 {
            bail!(ChatbotError::Training(format!(
                "need at least two distinct intents, found {}",
                per_class.len()
            )));
        }

        let n_samples = features.len() as f64;
        let mut classes = Vec::with_capacity(per_class.len());
        let mut class_log_prior = Vec::with_capacity(per_class.len());
        let mut feature_log_prob = Vec::with_capacity(per_class.len());
        for (label, (count, totals)) in per_class {
            let denominator = totals.iter().sum::<f64>() + alpha * n_features as f64;
            classes.push(label.to_string());
            class_log_prior.push((count as f64 / n_samples).ln());
            feature_log_prob.push(
                totals
                    .iter()
                    .map(|total| ((total + alpha) / denominator).ln())
                    .collect(),
            );
        }

        Ok(Self {
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Joint log-likelihood of `x` for every class, in `classes()` order.
    pub fn joint_log_likelihood(&self, x: &[f64]) -> Vec<f64> {
        self.feature_log_prob
            .iter()
            .zip(&self.class_log_prior)
            .map(|(log_probs, prior)| {
                prior + log_probs.iter().zip(x).map(|(lp, v)| lp * v).sum::<f64>()
            })
            .collect()
    }

    /// Returns the most likely class for `x`.
    pub fn predict(&self, x: &[f64]) -> &str {
        let scores = self.joint_log_likelihood(x);
        let mut best = 0;
        for (idx, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = idx;
            }
        }
        &self.classes[best]
    }

    /// The label set, sorted ascending.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Checks internal consistency after deserialization.
    pub(crate) fn is_consistent(&self, n_features: usize) -> bool {
        !self.classes.is_empty()
            && self.class_log_prior.len() == self.classes.len()
            && self.feature_log_prob.len() == self.classes.len()
            && self
                .feature_log_prob
                .iter()
                .all(|row| row.len() == n_features && row.iter().all(|v| v.is_finite()))
    }
}
