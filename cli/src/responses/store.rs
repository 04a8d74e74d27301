//! # Response Table Persistence
//!
//! File: cli/src/responses/store.rs
//!
//! Reads and writes `responses.json`: a JSON object mapping each intent label
//! to an array of reply strings, written with four-space indentation so it
//! stays pleasant to edit by hand.
//!
//! ```json
//! {
//!     "default": [
//!         "Hmm, I didn't catch that. Try something else!"
//!     ],
//!     "greet": [
//!         "Hello! What can I do for you, rey?"
//!     ]
//! }
//! ```
//!
use crate::common::fs::io;
use crate::core::error::Result;
use crate::responses::table::ResponseTable;
use anyhow::Context;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

/// Reads and parses a response table file.
pub fn load_responses(path: &Path) -> Result<ResponseTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read responses file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))
}

/// Renders `table` as indented JSON.
pub fn to_json(table: &ResponseTable) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    table
        .serialize(&mut serializer)
        .context("Failed to encode response table as JSON")?;
    buf.push(b'\n');
    String::from_utf8(buf).context("Response table JSON is not valid UTF-8")
}

/// Writes `table` to `path`, replacing any existing file durably.
pub fn save_responses(path: &Path, table: &ResponseTable) -> Result<()> {
    let json = to_json(table)?;
    io::write_file_durable(path, json.as_bytes())
        .with_context(|| format!("Failed to save responses to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[test]
    fn test_save_load_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("responses.json");
        let table = ResponseTable::builtin();
        save_responses(&path, &table)?;
        assert_eq!(load_responses(&path)?, table);
        Ok(())
    }

    #[test]
    fn test_json_uses_four_space_indent() -> Result<()> {
        let mut entries = BTreeMap::new();
        entries.insert("default".to_string(), vec!["Hmm?".to_string()]);
        let json = to_json(&ResponseTable::new(entries))?;
        assert_eq!(json, "{\n    \"default\": [\n        \"Hmm?\"\n    ]\n}\n");
        Ok(())
    }

    #[test]
    fn test_load_accepts_hand_written_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("responses.json");
        fs::write(
            &path,
            r#"{"greet": ["Yo!"], "default": ["Say what?", "’sup"]}"#,
        )?;
        let table = load_responses(&path)?;
        assert_eq!(table.replies("greet").unwrap(), ["Yo!".to_string()]);
        assert_eq!(table.replies("default").unwrap()[1], "\u{2019}sup");
        Ok(())
    }

    #[test]
    fn test_load_rejects_wrong_shape() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("responses.json");
        fs::write(&path, r#"{"greet": "not a list"}"#)?;
        let err = load_responses(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON"));
        Ok(())
    }
}
