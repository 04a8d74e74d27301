//! # RoboChat Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the filesystem input/output operations RoboChat
//! needs for its data files. It wraps `std::fs` calls with `anyhow` context
//! and makes every write durable before reporting success, so that a crash
//! right after a save (or after a transcript turn) does not lose data.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: Creates a directory (and parents) if missing; errors if the path is a file.
//! - **`write_file_durable`**: Writes bytes to a file, replacing it, then flushes and `sync_all`s.
//! - **`open_append`**: Opens (creating if needed) a file in append mode for the transcript.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::common::fs::io;
//!
//! io::ensure_dir_exists(&paths.data_dir)?;
//! io::write_file_durable(&paths.responses, json.as_bytes())?;
//! let history = io::open_append(&paths.history)?;
//! ```
//!
use crate::core::error::{ChatbotError, Result};
use anyhow::Context;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist it is created recursively (like `mkdir -p`).
/// If it exists but is not a directory, `ChatbotError::FileSystem` is returned.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(ChatbotError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Writes `content` to `path`, overwriting any existing file.
///
/// The parent directory is created if needed. The data is flushed and synced
/// to disk before this returns, so a successful return means the file is
/// durable.
///
/// # Errors
///
/// Returns an `Err` if the parent directory cannot be created or if creating,
/// writing or syncing the file fails.
pub fn write_file_durable(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir_exists(parent)?;
        }
    }

    let mut file =
        File::create(path).with_context(|| format!("Failed to create file {:?}", path))?;
    file.write_all(content)
        .with_context(|| format!("Failed to write to file {:?}", path))?;
    file.flush()
        .with_context(|| format!("Failed to flush file {:?}", path))?;
    file.sync_all()
        .with_context(|| format!("Failed to sync file {:?} to disk", path))?;
    info!("Wrote {} bytes to file: {:?}", content.len(), path);
    Ok(())
}

/// Opens `path` for appending, creating it (and its parent) when missing.
pub fn open_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir_exists(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {:?} for appending", path))?;
    debug!("Opened {:?} in append mode", path);
    Ok(file)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Test `ensure_dir_exists` when the directory needs to be created, including parents.
    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    /// Test `ensure_dir_exists` when the target path exists but is a file.
    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    /// Writing replaces the previous content and creates missing parents.
    #[test]
    fn test_write_file_durable_overwrites() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("nested/data.json");
        write_file_durable(&file_path, b"first")?;
        write_file_durable(&file_path, b"second")?;
        assert_eq!(fs::read_to_string(&file_path)?, "second");
        Ok(())
    }

    /// Appending keeps earlier content.
    #[test]
    fn test_open_append_keeps_existing_content() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("log.txt");
        fs::write(&file_path, "one\n")?;
        {
            let mut file = open_append(&file_path)?;
            writeln!(file, "two")?;
        }
        assert_eq!(fs::read_to_string(&file_path)?, "one\ntwo\n");
        Ok(())
    }
}
