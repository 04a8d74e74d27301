//! # Intent Classifier
//!
//! File: cli/src/nlp/classifier.rs
//!
//! ## Overview
//!
//! The two-stage text classification pipeline used by the chatbot: a
//! [`TfIdfVectorizer`] followed by a [`MultinomialNb`]. This module owns
//! training from labelled examples, prediction on cleaned messages, and the
//! on-disk model format.
//!
//! ## Model File Format
//!
//! The model is stored as a bincode blob (varint encoding, size-limited):
//!
//! ```text
//! magic          8 bytes  "RCHATMDL"
//! format_version varint   MODEL_FORMAT_VERSION
//! model          IntentModel (vectorizer + classifier)
//! ```
//!
//! The header is decoded first so that a file written by a different format
//! version is reported as such instead of as a generic decode failure.
//!
//! ## Examples
//!
//! ```rust,ignore
//! let model = IntentModel::train(TRAINING_EXAMPLES)?;
//! model.save(&paths.model)?;
//! let reloaded = IntentModel::load(&paths.model)?;
//! assert_eq!(reloaded.predict_label("hello"), "greet");
//! ```
//!
use crate::common::fs::io;
use crate::core::error::{ChatbotError, Result};
use crate::nlp::dataset::TrainingExample;
use crate::nlp::naive_bayes::{MultinomialNb, DEFAULT_ALPHA};
use crate::nlp::normalize::normalize;
use crate::nlp::vectorizer::TfIdfVectorizer;
use anyhow::{bail, Context};
use bincode::Options;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const MODEL_MAGIC: [u8; 8] = *b"RCHATMDL";
/// Bumped whenever the serialized layout of [`IntentModel`] changes.
pub const MODEL_FORMAT_VERSION: u32 = 1;
/// Upper bound on decoded model size; guards against corrupt length prefixes.
const MAX_MODEL_BYTES: u64 = 16 * 1024 * 1024;

/// Anything that can turn a cleaned message into an intent label.
///
/// The session loop depends on this trait rather than on [`IntentModel`]
/// so tests can drive it with a scripted predictor.
pub trait IntentPredictor {
    /// Predicts the intent label for an already normalized message.
    fn predict(&self, cleaned: &str) -> Result<String>;

    /// The closed set of labels this predictor can emit.
    fn labels(&self) -> Vec<String>;
}

/// A fitted TF-IDF + multinomial naive Bayes pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentModel {
    vectorizer: TfIdfVectorizer,
    classifier: MultinomialNb,
}

#[derive(Serialize, Deserialize)]
struct ModelHeader {
    magic: [u8; 8],
    format_version: u32,
}

#[derive(Serialize, Deserialize)]
struct ModelEnvelope<M> {
    header: ModelHeader,
    model: M,
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new().with_limit(MAX_MODEL_BYTES)
}

impl IntentModel {
    /// Trains a model from raw labelled examples.
    ///
    /// Each example's text is normalized exactly as user input is before
    /// prediction. Training is deterministic for a given example order.
    ///
    /// # Errors
    ///
    /// `ChatbotError::Training` for an empty example set, a single intent, or
    /// examples that normalize to an empty vocabulary.
    pub fn train(examples: &[TrainingExample]) -> Result<Self> {
        if examples.is_empty() {
            bail!(ChatbotError::Training("no training examples".to_string()));
        }

        let cleaned: Vec<String> = examples.iter().map(|ex| normalize(ex.text)).collect();
        debug!("Cleaned training messages: {:?}", cleaned);

        let vectorizer = TfIdfVectorizer::fit(&cleaned)?;
        let features: Vec<Vec<f64>> = cleaned.iter().map(|doc| vectorizer.transform(doc)).collect();
        let labels: Vec<&str> = examples.iter().map(|ex| ex.intent).collect();
        let classifier = MultinomialNb::fit(&features, &labels, DEFAULT_ALPHA)?;

        info!(
            "Trained intent model: {} examples, {} terms, intents {:?}",
            examples.len(),
            vectorizer.vocabulary_size(),
            classifier.classes()
        );
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Predicts the label of a cleaned message. Never fails; an empty or
    /// fully unknown message falls back to the class priors.
    pub fn predict_label(&self, cleaned: &str) -> &str {
        let features = self.vectorizer.transform(cleaned);
        self.classifier.predict(&features)
    }

    /// The label set, sorted ascending.
    pub fn classes(&self) -> &[String] {
        self.classifier.classes()
    }

    /// Fraction of `examples` whose label the model reproduces.
    pub fn accuracy(&self, examples: &[TrainingExample]) -> f64 {
        if examples.is_empty() {
            return 0.0;
        }
        let correct = examples
            .iter()
            .filter(|ex| self.predict_label(&normalize(ex.text)) == ex.intent)
            .count();
        correct as f64 / examples.len() as f64
    }

    /// Serializes the model to `path`, replacing any existing file durably.
    pub fn save(&self, path: &Path) -> Result<()> {
        let envelope = ModelEnvelope {
            header: ModelHeader {
                magic: MODEL_MAGIC,
                format_version: MODEL_FORMAT_VERSION,
            },
            model: self,
        };
        let bytes = codec()
            .serialize(&envelope)
            .context("Failed to encode intent model")?;
        io::write_file_durable(path, &bytes)
            .with_context(|| format!("Failed to save model to {}", path.display()))
    }

    /// Loads a model previously written by [`IntentModel::save`].
    ///
    /// # Errors
    ///
    /// I/O errors reading the file are returned with context. Anything wrong
    /// with the contents (bad magic, other format version, undecodable or
    /// inconsistent data) is reported as `ChatbotError::ModelFormat`.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read model file {}", path.display()))?;

        let header: ModelHeader = codec()
            .allow_trailing_bytes()
            .deserialize(&bytes)
            .map_err(|e| ChatbotError::ModelFormat(format!("unreadable header: {}", e)))?;
        if header.magic != MODEL_MAGIC {
            bail!(ChatbotError::ModelFormat(
                "not a RoboChat model file".to_string()
            ));
        }
        if header.format_version != MODEL_FORMAT_VERSION {
            bail!(ChatbotError::ModelFormat(format!(
                "format version {} is not supported (expected {})",
                header.format_version, MODEL_FORMAT_VERSION
            )));
        }

        let envelope: ModelEnvelope<IntentModel> = codec()
            .deserialize(&bytes)
            .map_err(|e| ChatbotError::ModelFormat(format!("corrupt model data: {}", e)))?;
        let model = envelope.model;
        if !model.vectorizer.is_consistent()
            || !model
                .classifier
                .is_consistent(model.vectorizer.vocabulary_size())
        {
            bail!(ChatbotError::ModelFormat(
                "model dimensions are inconsistent".to_string()
            ));
        }
        debug!("Loaded intent model from {}", path.display());
        Ok(model)
    }
}

impl IntentPredictor for IntentModel {
    fn predict(&self, cleaned: &str) -> Result<String> {
        Ok(self.predict_label(cleaned).to_string())
    }

    fn labels(&self) -> Vec<String> {
        self.classes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::dataset::TRAINING_EXAMPLES;
    use tempfile::tempdir;

    fn trained() -> IntentModel {
        IntentModel::train(TRAINING_EXAMPLES).expect("built-in dataset should train")
    }

    #[test]
    fn test_reproduces_training_labels() {
        let model = trained();
        for ex in TRAINING_EXAMPLES {
            assert_eq!(
                model.predict_label(&normalize(ex.text)),
                ex.intent,
                "mislabelled training message {:?}",
                ex.text
            );
        }
        assert_eq!(model.accuracy(TRAINING_EXAMPLES), 1.0);
    }

    #[test]
    fn test_hello_there_is_a_greeting() {
        let model = trained();
        let cleaned = normalize("hello there");
        assert_eq!(cleaned, "hello");
        assert_eq!(model.predict_label(&cleaned), "greet");
    }

    #[test]
    fn test_demo_messages() {
        let model = trained();
        assert_eq!(model.predict_label(&normalize("what's the weather in Texas")), "ask_weather");
        assert_eq!(model.predict_label(&normalize("tell me a joke")), "tell_joke");
        assert_eq!(model.predict_label(&normalize("hi boss")), "greet");
    }

    #[test]
    fn test_empty_message_still_gets_a_label() {
        let model = trained();
        let cleaned = normalize("the is a");
        assert_eq!(cleaned, "");
        let label = model.predict_label(&cleaned);
        assert!(model.classes().iter().any(|c| c == label));
    }

    #[test]
    fn test_labels_are_the_training_intents() {
        let model = trained();
        assert_eq!(model.labels(), vec!["ask_weather", "greet", "tell_joke"]);
    }

    #[test]
    fn test_training_is_deterministic() {
        assert_eq!(trained(), trained());
    }

    #[test]
    fn test_training_errors() {
        assert!(IntentModel::train(&[]).is_err());

        let single = [
            TrainingExample { text: "hi", intent: "greet" },
            TrainingExample { text: "hello", intent: "greet" },
        ];
        assert!(IntentModel::train(&single).is_err());

        let stop_words_only = [
            TrainingExample { text: "the", intent: "a" },
            TrainingExample { text: "is it", intent: "b" },
        ];
        assert!(IntentModel::train(&stop_words_only)
            .unwrap_err()
            .to_string()
            .contains("empty vocabulary"));
    }

    #[test]
    fn test_save_load_round_trip_predicts_identically() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("chatbot_model.bin");
        let model = trained();
        model.save(&path)?;
        let reloaded = IntentModel::load(&path)?;
        assert_eq!(reloaded, model);

        let probes = [
            "good evening",
            "is it going to rain in Seattle",
            "say a funny joke",
            "what time is it",
            "",
        ];
        for probe in probes {
            let cleaned = normalize(probe);
            assert_eq!(reloaded.predict_label(&cleaned), model.predict_label(&cleaned));
        }
        Ok(())
    }

    #[test]
    fn test_load_rejects_garbage() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("chatbot_model.bin");
        fs::write(&path, b"definitely not a model")?;
        let err = IntentModel::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ChatbotError>(),
            Some(ChatbotError::ModelFormat(_))
        ));
        Ok(())
    }

    #[test]
    fn test_load_rejects_other_format_version() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("chatbot_model.bin");
        let envelope = ModelEnvelope {
            header: ModelHeader {
                magic: MODEL_MAGIC,
                format_version: MODEL_FORMAT_VERSION + 1,
            },
            model: trained(),
        };
        fs::write(&path, codec().serialize(&envelope)?)?;
        let err = IntentModel::load(&path).unwrap_err();
        assert!(err.to_string().contains("format version"));
        Ok(())
    }

    #[test]
    fn test_load_rejects_truncated_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("chatbot_model.bin");
        trained().save(&path)?;
        let bytes = fs::read(&path)?;
        fs::write(&path, &bytes[..bytes.len() / 2])?;
        assert!(IntentModel::load(&path).is_err());
        Ok(())
    }
}
