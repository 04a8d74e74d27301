//! # RoboChat Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout RoboChat. It follows
//! the same split as the rest of the CLI:
//! - `ChatbotError`: a `thiserror` enum naming the failure categories the
//!   application distinguishes (configuration, filesystem, training, model
//!   format, response table, transcript).
//! - `Result<T>`: an alias for `anyhow::Result<T>` so call sites can attach
//!   context with `.with_context(...)` and return early with `bail!`.
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Return a specific error type
//! if classes.len() < 2 {
//!     bail!(ChatbotError::Training("need at least two intents".into()));
//! }
//!
//! // Add context to I/O errors
//! let raw = fs::read(&path)
//!     .with_context(|| format!("Failed to read model file {}", path.display()))?;
//!
//! // Pattern matching on error types
//! match result {
//!     Err(e) if e.downcast_ref::<ChatbotError>().is_some_and(|ce| matches!(ce, ChatbotError::ModelFormat(_))) => {
//!         // retrain
//!     }
//!     other => other?,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the RoboChat application.
#[derive(Error, Debug)]
pub enum ChatbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Model file is unusable: {0}")]
    ModelFormat(String),

    #[error("Response table has no replies for '{label}' and no 'default' replies.")]
    MalformedResponseTable { label: String },

    #[error("Chat transcript write failed: {source}")]
    Transcript {
        #[from]
        source: std::io::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
