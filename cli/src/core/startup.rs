//! # RoboChat Startup Resources
//!
//! File: cli/src/core/startup.rs
//!
//! ## Overview
//!
//! Brings the two persistent resources the chatbot needs into memory before
//! any conversation starts:
//!
//! - **Intent model**: loaded from the model file when it is usable, otherwise
//!   trained from the embedded dataset and saved. A file that exists but cannot
//!   be decoded is backed up, then replaced by a freshly trained model.
//! - **Response table**: the current file is backed up and loaded. A missing
//!   file gets the built-in table written out. A file that cannot be read or
//!   parsed, or that has no `"default"` replies to fall back on, is left
//!   alone and the built-in table is used for this run.
//!
//! Progress messages go to stdout, in line with what a user watching the
//! program start expects to see; decisions are also logged with `tracing`.
//!
use crate::common::fs::backup;
use crate::core::error::{ChatbotError, Result};
use crate::nlp::classifier::IntentModel;
use crate::nlp::dataset::TRAINING_EXAMPLES;
use crate::responses::store::{load_responses, save_responses};
use crate::responses::{ResponseTable, DEFAULT_KEY};
use anyhow::{bail, Context};
use std::path::Path;
use tracing::{debug, info, warn};

/// Where the in-memory model came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelOrigin {
    Loaded,
    /// No model file existed, or a retrain was requested.
    Trained,
    /// The model file was unusable and has been replaced.
    Retrained { reason: String },
}

/// Where the in-memory response table came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOrigin {
    Loaded,
    Created,
    /// The file could not be used; built-in replies are in effect.
    FallbackDefaults { reason: String },
}

/// Loads the model at `path`, or trains and saves a new one.
///
/// With `force_retrain` the existing file is ignored (but still backed up
/// before being overwritten).
pub fn load_or_train_model(path: &Path, force_retrain: bool) -> Result<(IntentModel, ModelOrigin)> {
    if path.exists() && !force_retrain {
        match IntentModel::load(path) {
            Ok(model) => {
                println!("Loaded model from {}", path.display());
                info!("Loaded intent model with classes {:?}", model.classes());
                return Ok((model, ModelOrigin::Loaded));
            }
            Err(e) if is_model_format_error(&e) => {
                warn!("Model file {} is unusable, retraining: {:#}", path.display(), e);
                println!("Model file is unusable ({}). Retraining...", e);
                let model = train_and_save(path)?;
                return Ok((
                    model,
                    ModelOrigin::Retrained {
                        reason: e.to_string(),
                    },
                ));
            }
            Err(e) => return Err(e),
        }
    }

    println!("Training a new model...");
    let model = train_and_save(path)?;
    Ok((model, ModelOrigin::Trained))
}

fn is_model_format_error(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<ChatbotError>(),
        Some(ChatbotError::ModelFormat(_))
    )
}

/// Trains from the embedded dataset and writes the model to `path`,
/// backing up whatever was there.
pub fn train_and_save(path: &Path) -> Result<IntentModel> {
    let model = IntentModel::train(TRAINING_EXAMPLES).context("Failed to train intent model")?;
    debug!(
        "Trained intent model on {} examples, classes {:?}",
        TRAINING_EXAMPLES.len(),
        model.classes()
    );

    if let Some(backup_path) = backup::backup_existing(path)? {
        println!("Created backup: {}", backup_path.display());
    }
    model.save(path)?;
    confirm_exists(path)?;
    println!("Saved model to {}", path.display());
    Ok(model)
}

/// Loads the response table at `path`, creating it with built-in replies if
/// it does not exist yet.
pub fn load_or_create_responses(path: &Path) -> Result<(ResponseTable, TableOrigin)> {
    if !path.exists() {
        let table = ResponseTable::builtin();
        save_responses(path, &table)?;
        confirm_exists(path)?;
        println!("Created response table at {}", path.display());
        info!("Wrote built-in response table to {}", path.display());
        return Ok((table, TableOrigin::Created));
    }

    if let Some(backup_path) = backup::backup_existing(path)? {
        println!("Created backup: {}", backup_path.display());
    }
    match load_responses(path) {
        Ok(table) if !table.has_default() => {
            warn!(
                "Response table {} has no '{}' replies; using built-in responses",
                path.display(),
                DEFAULT_KEY
            );
            println!(
                "{} has no '{}' replies. Using built-in responses.",
                path.display(),
                DEFAULT_KEY
            );
            Ok((
                ResponseTable::builtin(),
                TableOrigin::FallbackDefaults {
                    reason: format!("no '{}' replies", DEFAULT_KEY),
                },
            ))
        }
        Ok(table) => {
            println!("Loaded response table from {}", path.display());
            info!("Loaded response table with labels {:?}", table.labels().collect::<Vec<_>>());
            Ok((table, TableOrigin::Loaded))
        }
        Err(e) => {
            warn!("Using built-in responses: {:#}", e);
            println!(
                "Could not use {} ({:#}). Using built-in responses.",
                path.display(),
                e
            );
            Ok((
                ResponseTable::builtin(),
                TableOrigin::FallbackDefaults {
                    reason: format!("{:#}", e),
                },
            ))
        }
    }
}

/// Warns about model labels the table cannot answer specifically.
///
/// Returns the labels that will fall back to the `"default"` bucket.
pub fn check_coverage<'a>(table: &ResponseTable, labels: &'a [String]) -> Vec<&'a str> {
    let missing = table.missing_labels(labels);
    for label in &missing {
        warn!("No replies for intent '{}'; the '{}' replies will be used", label, DEFAULT_KEY);
    }
    if !missing.is_empty() && !table.has_default() {
        warn!(
            "Response table has no '{}' replies; intents {:?} cannot be answered",
            DEFAULT_KEY, missing
        );
    }
    missing
}

fn confirm_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!(ChatbotError::FileSystem(format!(
            "{} was written but does not exist",
            path.display()
        )));
    }
    println!("Confirmed {} exists", path.display());
    Ok(())
}
