//! # RoboChat Chat Command
//!
//! File: cli/src/commands/chat.rs
//!
//! ## Overview
//!
//! Implements `robochat chat`, which is also what runs when no command is
//! given. It prepares the model and replies, opens the chat history for
//! appending (after backing it up), optionally runs the warm-up demo, and
//! then hands the console to the session loop until the user types the exit
//! keyword, presses Ctrl+C, or closes standard input.
//!
//! ## Examples
//!
//! ```bash
//! # Chat with default settings
//! robochat
//!
//! # Skip the demo and leave with "bye"
//! robochat chat --no-demo --exit-keyword bye
//!
//! # Keep everything in a scratch directory
//! robochat --data-dir /tmp/robochat chat
//! ```
//!
use crate::commands::{load_effective_config, prepare_resources, GlobalArgs};
use crate::common::fs::{backup, io as fs_io};
use crate::core::config::ConfigOverrides;
use crate::core::error::Result;
use crate::nlp::dataset::DEMO_MESSAGES;
use crate::session::input::console_input;
use crate::session::transcript::Transcript;
use crate::session::{run_demo, ChatSession};
use clap::Parser;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::info;

/// Arguments for the `chat` command.
#[derive(Parser, Debug, Default)]
pub struct ChatArgs {
    /// Word that ends the conversation (matched ignoring case and surrounding spaces)
    #[arg(long, value_name = "WORD")]
    exit_keyword: Option<String>,
    /// Skip the warm-up demo
    #[arg(long)]
    no_demo: bool,
    /// Retrain the model even if a saved one loads fine
    #[arg(long)]
    retrain: bool,
}

/// Handles the `chat` command.
pub fn handle_chat(global: &GlobalArgs, args: ChatArgs) -> Result<()> {
    let config = load_effective_config(
        global,
        ConfigOverrides {
            exit_keyword: args.exit_keyword,
            no_demo: args.no_demo,
            ..ConfigOverrides::default()
        },
    )?;
    let resources = prepare_resources(&config, args.retrain)?;
    let transcript = open_transcript(&resources.paths.history)?;

    let mut rng = rand::rng();
    if config.session.show_demo {
        run_demo(
            &resources.model,
            &resources.responses,
            &mut rng,
            &mut io::stdout().lock(),
            DEMO_MESSAGES,
        )?;
    }

    let mut input = console_input()?;
    let mut session = ChatSession::new(
        &resources.model,
        &resources.responses,
        rng,
        io::stdout(),
        transcript,
        &config.session.exit_keyword,
    );
    let summary = session.run(&mut input)?;
    info!(
        "Logged {} turns to {}",
        summary.turns,
        resources.paths.history.display()
    );
    Ok(())
}

/// Backs up the history file and opens it for appending.
fn open_transcript(path: &Path) -> Result<Transcript<File>> {
    if let Some(backup_path) = backup::backup_existing(path)? {
        println!("Created backup: {}", backup_path.display());
    }
    let file = fs_io::open_append(path)?;
    println!("Opened {} for writing", path.display());
    if path.is_file() {
        println!("Confirmed {} exists", path.display());
    }
    Ok(Transcript::new(file))
}
