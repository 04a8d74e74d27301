//! # RoboChat Responses (`responses`)
//!
//! File: cli/src/responses/mod.rs
//!
//! ## Overview
//!
//! The reply side of the chatbot:
//!
//! - **`table`**: `ResponseTable`, the built-in replies, and random selection
//!   with fallback to the `"default"` bucket.
//! - **`store`**: reading and writing `responses.json`.
//!

pub mod store;
pub mod table;

pub use table::{ResponseTable, DEFAULT_KEY};
