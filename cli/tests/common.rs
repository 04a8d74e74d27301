//! # RoboChat CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test runs
//! the compiled `robochat` binary against its own temporary directory so no
//! test touches the real Documents folder or user configuration.
//!

// Allow potentially unused code in this common module, as different test files might use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch home for one test: data files live in `<root>/data`.
pub struct Sandbox {
    pub root: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.path().join("data")
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.data_dir().join(name)
    }

    pub fn model(&self) -> PathBuf {
        self.file("chatbot_model.bin")
    }

    pub fn responses(&self) -> PathBuf {
        self.file("responses.json")
    }

    pub fn history(&self) -> PathBuf {
        self.file("chat_history.txt")
    }

    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path).expect("Failed to read file")
    }

    /// `robochat` with config lookup and the data directory pinned inside the sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = robochat_cmd();
        cmd.env("HOME", self.root.path())
            .env("XDG_CONFIG_HOME", self.root.path().join("config"))
            .env("ROBOCHAT_DATA_DIR", self.data_dir())
            .env_remove("RUST_LOG");
        cmd
    }

    /// Same environment as [`Sandbox::cmd`], for tests that need to talk to
    /// a running child process.
    pub fn spawnable(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("robochat"));
        cmd.env("HOME", self.root.path())
            .env("XDG_CONFIG_HOME", self.root.path().join("config"))
            .env("ROBOCHAT_DATA_DIR", self.data_dir())
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Helper function to create an `assert_cmd::Command` for the compiled `robochat` binary.
///
/// ## Panics
/// Panics if the `robochat` binary cannot be found via `Command::cargo_bin`.
pub fn robochat_cmd() -> Command {
    Command::cargo_bin("robochat").expect("Failed to find robochat binary for testing")
}
