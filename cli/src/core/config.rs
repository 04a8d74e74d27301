//! # RoboChat Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements the configuration system for RoboChat: loading the
//! optional TOML file, applying command-line overrides, expanding `~` in
//! paths, validating the result, and resolving the three data files the
//! chatbot works with (model, response table, transcript).
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (`--data-dir`, `--exit-keyword`, `--no-demo`)
//! 2. The file given with `--config`, or else `~/.config/robochat/config.toml`
//! 3. Default values defined in the code (data files live in the user's
//!    Documents directory)
//!
//! ## Examples
//!
//! ```toml
//! [paths]
//! data_dir = "~/Documents"
//! model_file = "chatbot_model.bin"
//! responses_file = "responses.json"
//! history_file = "chat_history.txt"
//!
//! [session]
//! exit_keyword = "exit"
//! show_demo = true
//! ```
//!
//! ```rust,ignore
//! let mut cfg = config::load_config(cli.config.as_deref())?;
//! cfg.apply_overrides(&overrides)?;
//! let paths = cfg.paths.resolve();
//! ```
//!
use crate::core::error::{ChatbotError, Result};
use anyhow::{anyhow, Context};
use directories::{ProjectDirs, UserDirs};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Where the chatbot keeps its files.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding all data files (can use ~). Will be expanded.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// File name of the serialized classifier, relative to `data_dir`.
    #[serde(default = "default_model_file")]
    pub model_file: String,
    /// File name of the JSON response table, relative to `data_dir`.
    #[serde(default = "default_responses_file")]
    pub responses_file: String,
    /// File name of the append-only chat transcript, relative to `data_dir`.
    #[serde(default = "default_history_file")]
    pub history_file: String,
}

/// Interactive session behaviour.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Word that ends the session (compared trimmed and case-insensitively).
    #[serde(default = "default_exit_keyword")]
    pub exit_keyword: String,
    /// Whether to classify the built-in probe messages before chatting.
    #[serde(default = "default_show_demo")]
    pub show_demo: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            model_file: default_model_file(),
            responses_file: default_responses_file(),
            history_file: default_history_file(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            exit_keyword: default_exit_keyword(),
            show_demo: default_show_demo(),
        }
    }
}

fn default_data_dir() -> String {
    UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(|p| p.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "~/Documents".to_string())
}
fn default_model_file() -> String {
    "chatbot_model.bin".to_string()
}
fn default_responses_file() -> String {
    "responses.json".to_string()
}
fn default_history_file() -> String {
    "chat_history.txt".to_string()
}
fn default_exit_keyword() -> String {
    "exit".to_string()
}
fn default_show_demo() -> bool {
    true
}

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub exit_keyword: Option<String>,
    pub no_demo: bool,
}

/// Fully resolved locations of the chatbot's data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPaths {
    pub data_dir: PathBuf,
    pub model: PathBuf,
    pub responses: PathBuf,
    pub history: PathBuf,
}

impl PathsConfig {
    /// Joins the configured file names onto the data directory.
    pub fn resolve(&self) -> ChatPaths {
        let data_dir = PathBuf::from(&self.data_dir);
        ChatPaths {
            model: data_dir.join(&self.model_file),
            responses: data_dir.join(&self.responses_file),
            history: data_dir.join(&self.history_file),
            data_dir,
        }
    }
}

impl Config {
    /// Applies command-line overrides, then re-expands and re-validates.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> Result<()> {
        if let Some(dir) = &overrides.data_dir {
            debug!("Overriding data directory with {}", dir.display());
            self.paths.data_dir = dir.to_string_lossy().into_owned();
        }
        if let Some(keyword) = &overrides.exit_keyword {
            self.session.exit_keyword = keyword.clone();
        }
        if overrides.no_demo {
            self.session.show_demo = false;
        }
        expand_config_paths(self);
        validate_config(self).context("Configuration validation failed")
    }
}

const CONFIG_FILENAME: &str = "config.toml";

/// Loads configuration from `explicit` if given, else from the user config
/// directory, else the built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(anyhow!(ChatbotError::Config(format!(
                    "Configuration file '{}' does not exist.",
                    path.display()
                ))));
            }
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => load_user_config()?.unwrap_or_default(),
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "RoboChat", "robochat") else {
        debug!("Could not determine user config directory, using defaults.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join(CONFIG_FILENAME);
    if config_path.exists() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn expand_config_paths(config: &mut Config) {
    config.paths.data_dir = shellexpand::tilde(&config.paths.data_dir).into_owned();
    debug!("Expanded data directory: {}", config.paths.data_dir);
}

fn validate_config(config: &Config) -> Result<()> {
    let paths = &config.paths;
    if paths.data_dir.trim().is_empty() {
        return Err(anyhow!(ChatbotError::Config(
            "Data directory cannot be empty.".to_string()
        )));
    }
    let data_dir = Path::new(&paths.data_dir);
    if data_dir.exists() && !data_dir.is_dir() {
        return Err(anyhow!(ChatbotError::Config(format!(
            "Configured data path '{}' exists but is not a directory.",
            data_dir.display()
        ))));
    }

    let files = [
        ("model_file", &paths.model_file),
        ("responses_file", &paths.responses_file),
        ("history_file", &paths.history_file),
    ];
    for (key, name) in files {
        if name.trim().is_empty() {
            return Err(anyhow!(ChatbotError::Config(format!(
                "'{}' cannot be empty.",
                key
            ))));
        }
    }
    for (i, (key_a, name_a)) in files.iter().enumerate() {
        for (key_b, name_b) in &files[i + 1..] {
            if name_a == name_b {
                return Err(anyhow!(ChatbotError::Config(format!(
                    "'{}' and '{}' both point to '{}'.",
                    key_a, key_b, name_a
                ))));
            }
        }
    }

    if config.session.exit_keyword.trim().is_empty() {
        return Err(anyhow!(ChatbotError::Config(
            "Exit keyword cannot be empty.".to_string()
        )));
    }
    Ok(())
}
