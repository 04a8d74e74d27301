//! # RoboChat Train Command
//!
//! File: cli/src/commands/train.rs
//!
//! Implements `robochat train`: fits a fresh model on the embedded dataset,
//! backs up and overwrites the model file, and reports training-set accuracy.
//! The response table is left untouched.
//!
use crate::commands::{load_effective_config, GlobalArgs};
use crate::common::fs::io;
use crate::core::config::ConfigOverrides;
use crate::core::error::Result;
use crate::core::startup;
use crate::nlp::dataset::TRAINING_EXAMPLES;

/// Handles the `train` command.
pub fn handle_train(global: &GlobalArgs) -> Result<()> {
    let config = load_effective_config(global, ConfigOverrides::default())?;
    let paths = config.paths.resolve();
    io::ensure_dir_exists(&paths.data_dir)?;

    let model = startup::train_and_save(&paths.model)?;
    let accuracy = model.accuracy(TRAINING_EXAMPLES);
    println!(
        "Trained on {} examples across {} intents: {}",
        TRAINING_EXAMPLES.len(),
        model.classes().len(),
        model.classes().join(", ")
    );
    println!("Training-set accuracy: {:.1}%", accuracy * 100.0);
    Ok(())
}
