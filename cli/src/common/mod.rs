//! # RoboChat Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities that are not specific to the chatbot's domain logic.
//! Currently this is only filesystem support (`fs`), used by the model,
//! response table and transcript persistence code.
//!

/// Utilities for filesystem operations (durable writes, appends, backups).
pub mod fs;
