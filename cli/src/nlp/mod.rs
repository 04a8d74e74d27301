//! # RoboChat Language Processing (`nlp`)
//!
//! File: cli/src/nlp/mod.rs
//!
//! ## Overview
//!
//! Everything between a raw line of user input and an intent label:
//!
//! - **`normalize`**: lowercasing, word tokenization, stop-word removal.
//! - **`dataset`**: the built-in labelled training examples and demo probes.
//! - **`vectorizer`**: TF-IDF feature extraction.
//! - **`naive_bayes`**: the multinomial naive Bayes classifier.
//! - **`classifier`**: the trained pipeline (`IntentModel`), its on-disk
//!   format, and the `IntentPredictor` trait the session depends on.
//!
//! ```text
//! raw text ── normalize ──> cleaned text ── vectorizer ──> features ── naive_bayes ──> label
//! ```
//!

pub mod classifier;
pub mod dataset;
pub mod naive_bayes;
pub mod normalize;
pub mod vectorizer;
