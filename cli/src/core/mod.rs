//! # RoboChat Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure the command handlers build on.
//!
//! ## Architecture
//!
//! - `config`: configuration loading, CLI overrides, and validation
//! - `error`: error types and the crate-wide `Result` alias
//! - `startup`: loading or creating the model and response table
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{ChatbotError, Result}; // For error handling
//! use crate::core::startup; // For preparing the model and replies
//! ```
//!
pub mod config;
pub mod error;
pub mod startup;
