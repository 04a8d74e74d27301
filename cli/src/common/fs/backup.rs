//! # RoboChat Backup-Before-Overwrite
//!
//! File: cli/src/common/fs/backup.rs
//!
//! ## Overview
//!
//! Every data file RoboChat touches (model, response table, transcript) is
//! copied to a sibling `<name>.backup` before it is overwritten or appended
//! to. Only one generation is kept: a new backup replaces the previous one.
//!
//! ```rust,ignore
//! if let Some(backup) = backup::backup_existing(&paths.responses)? {
//!     println!("Created backup: {}", backup.display());
//! }
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const BACKUP_SUFFIX: &str = ".backup";

/// Returns the backup location for `path`: the same path with `.backup` appended.
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copies `path` to its backup location if it exists.
///
/// # Returns
///
/// * `Ok(Some(backup_path))` when a backup was written.
/// * `Ok(None)` when `path` does not exist (nothing to back up).
///
/// # Errors
///
/// Returns an `Err` if the copy fails.
pub fn backup_existing(path: &Path) -> Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }
    let backup_path = backup_path_for(path);
    fs::copy(path, &backup_path).with_context(|| {
        format!(
            "Failed to back up {} to {}",
            path.display(),
            backup_path.display()
        )
    })?;
    info!("Backed up {:?} to {:?}", path, backup_path);
    Ok(Some(backup_path))
}
