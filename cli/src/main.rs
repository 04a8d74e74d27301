//! # RoboChat Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the RoboChat CLI, a small
//! terminal chatbot that guesses the intent of each message with a TF-IDF +
//! Naive Bayes model and answers from a table of canned replies.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the appropriate command handler
//!
//! ## Architecture
//!
//! - Each top-level command (`chat`, `train`, `classify`) is a variant of the `Commands` enum
//! - Running without a command starts `chat`
//! - Options shared by every command (`--config`, `--data-dir`) live in `commands::GlobalArgs`
//! - All errors are propagated to this level for consistent handling
//!
//! ## Examples
//!
//! ```bash
//! # Start chatting
//! robochat
//!
//! # Classify a message with debug logging
//! robochat -vv classify "what's the weather in Texas"
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to appropriate command handler
//! 4. Format and display any errors that occur
//!
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (chat, train, classify)
mod common; // Shared filesystem helpers
mod core; // Core infrastructure (errors, config, startup)
mod nlp; // Text normalization and intent classification
mod responses; // Reply tables and their JSON file
mod session; // The interactive chat loop

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "robochat",
    about = "🤖 RoboChat: a tiny intent-guessing chatbot for your terminal",
    long_about = "Chat with a robot that guesses what you mean (a greeting, a weather question, a joke request)\n\
                  and answers from an editable table of replies. Conversations are logged\n\
                  to a history file in the data directory.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    global: commands::GlobalArgs,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Chat with the robot (default)
    Chat(commands::chat::ChatArgs),
    /// Retrain the intent model and overwrite the saved copy
    Train,
    /// Classify messages without starting a chat
    #[command(alias = "c")]
    Classify(commands::classify::ClassifyArgs),
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        None => commands::chat::handle_chat(&cli.global, commands::chat::ChatArgs::default()),
        Some(Commands::Chat(args)) => commands::chat::handle_chat(&cli.global, args),
        Some(Commands::Train) => commands::train::handle_train(&cli.global),
        Some(Commands::Classify(args)) => commands::classify::handle_classify(&cli.global, args),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
