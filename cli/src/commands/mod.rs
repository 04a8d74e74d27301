//! # RoboChat Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the RoboChat CLI and the
//! startup steps they share.
//!
//! ## Architecture
//!
//! - `chat`: interactive session (the default when no command is given)
//! - `train`: retrain the model from the embedded dataset
//! - `classify`: one-shot classification of messages given as arguments
//!
//! Every command first resolves its configuration with
//! [`load_effective_config`], then calls [`prepare_resources`] to get a model
//! and response table ready in the data directory.
//!
pub mod chat;
pub mod classify;
pub mod train;

use crate::common::fs::io;
use crate::core::config::{self, ChatPaths, Config, ConfigOverrides};
use crate::core::error::Result;
use crate::core::startup::{self, ModelOrigin, TableOrigin};
use crate::nlp::classifier::{IntentModel, IntentPredictor};
use crate::responses::ResponseTable;
use clap::Args;
use std::path::PathBuf;
use tracing::{debug, info};

/// Options accepted by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file to use instead of the per-user config.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Directory holding the model, response table and chat history
    #[arg(long, global = true, env = "ROBOCHAT_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Model and replies, ready for a conversation.
pub struct Resources {
    pub paths: ChatPaths,
    pub model: IntentModel,
    pub responses: ResponseTable,
}

/// Loads the configuration and applies global and command-specific overrides.
pub fn load_effective_config(global: &GlobalArgs, mut overrides: ConfigOverrides) -> Result<Config> {
    let mut config = config::load_config(global.config.as_deref())?;
    overrides.data_dir = global.data_dir.clone();
    config.apply_overrides(&overrides)?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Creates the data directory if needed and loads (or creates) the model and
/// the response table inside it.
pub fn prepare_resources(config: &Config, force_retrain: bool) -> Result<Resources> {
    let paths = config.paths.resolve();
    io::ensure_dir_exists(&paths.data_dir)?;
    println!("Data directory: {}", paths.data_dir.display());

    let (model, model_origin) = startup::load_or_train_model(&paths.model, force_retrain)?;
    let (responses, table_origin) = startup::load_or_create_responses(&paths.responses)?;
    startup::check_coverage(&responses, &model.labels());

    if let ModelOrigin::Retrained { reason } = &model_origin {
        info!("Model was rebuilt: {}", reason);
    }
    if let TableOrigin::FallbackDefaults { reason } = &table_origin {
        info!("Response table fell back to defaults: {}", reason);
    }
    info!(
        "Resources ready (model: {:?}, responses: {:?})",
        model_origin, table_origin
    );

    Ok(Resources {
        paths,
        model,
        responses,
    })
}
