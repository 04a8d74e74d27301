//! # Chat Transcript
//!
//! File: cli/src/session/transcript.rs
//!
//! ## Overview
//!
//! Appends each chat turn to the history file as timestamped lines followed
//! by a separator:
//!
//! ```text
//! [2024-05-01 14:03:12] You: hello there
//! [2024-05-01 14:03:12] Robot guesses: 'greet' intent
//! [2024-05-01 14:03:12] Robot says: Hello! What can I do for you, rey?
//! --------------------------------------------------
//! ```
//!
//! Every turn is flushed and synced before `record_turn` returns, so a crash
//! right after a turn cannot drop it. Any write failure is returned as
//! `ChatbotError::Transcript`, which the session treats as fatal.
//!
use crate::core::error::ChatbotError;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{self, Write};

/// Width of the separator line written after every turn.
pub const SEPARATOR_WIDTH: usize = 50;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A `Write` target that can also push its data to durable storage.
pub trait TranscriptSink: Write {
    /// Makes previously flushed data durable. No-op for in-memory sinks.
    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl TranscriptSink for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }
}

impl TranscriptSink for Vec<u8> {}

/// The separator line, without trailing newline.
pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Formats one transcript line, without trailing newline.
pub fn format_line(at: &DateTime<Local>, speaker: &str, text: &str) -> String {
    format!("[{}] {}: {}", at.format(TIMESTAMP_FORMAT), speaker, text)
}

/// Append-only writer for chat turns.
#[derive(Debug)]
pub struct Transcript<W: TranscriptSink> {
    sink: W,
}

impl<W: TranscriptSink> Transcript<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Writes one turn: a line per `(speaker, text)` entry, then the separator.
    pub fn record_turn(
        &mut self,
        at: &DateTime<Local>,
        entries: &[(&str, &str)],
    ) -> Result<(), ChatbotError> {
        let mut block = String::new();
        for (speaker, text) in entries {
            block.push_str(&format_line(at, speaker, text));
            block.push('\n');
        }
        block.push_str(&separator());
        block.push('\n');

        self.sink.write_all(block.as_bytes())?;
        self.sink.flush()?;
        self.sink.sync()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.sink
    }
}
