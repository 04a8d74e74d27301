//! # RoboChat Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by the persistence code:
//!
//! - **`io`**: directory creation, durable whole-file writes, append-mode opens.
//! - **`backup`**: copy-to-`.backup` before a file is overwritten or appended to.
//!
//! Callers import the specific submodule, e.g. `crate::common::fs::io::write_file_durable`.
//!

/// Copies existing data files to `<name>.backup`.
pub mod backup;
/// Basic file I/O (`ensure_dir_exists`, `write_file_durable`, `open_append`).
pub mod io;
