//! # RoboChat Classify Command
//!
//! File: cli/src/commands/classify.rs
//!
//! Implements `robochat classify <TEXT>...`, a non-interactive way to see how
//! messages are cleaned, which intent they map to, and what the robot would
//! answer. Nothing is written to the chat history.
//!
//! ```bash
//! robochat classify "hello there" "tell me a joke"
//! ```
//!
use crate::commands::{load_effective_config, prepare_resources, GlobalArgs};
use crate::core::config::ConfigOverrides;
use crate::core::error::Result;
use crate::session::respond;
use crate::session::transcript::separator;
use clap::Parser;

/// Arguments for the `classify` command.
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Messages to classify
    #[arg(required = true, value_name = "TEXT")]
    texts: Vec<String>,
}

/// Handles the `classify` command.
pub fn handle_classify(global: &GlobalArgs, args: ClassifyArgs) -> Result<()> {
    let config = load_effective_config(global, ConfigOverrides::default())?;
    let resources = prepare_resources(&config, false)?;
    let mut rng = rand::rng();

    println!("{}", separator());
    for text in &args.texts {
        let reply = respond(&resources.model, &resources.responses, &mut rng, text)?;
        println!("Message: '{}'", text);
        println!("Cleaned: '{}'", reply.cleaned);
        println!("Robot guesses: '{}' intent", reply.intent);
        println!("Robot says: {}", reply.text);
        println!("{}", separator());
    }
    Ok(())
}
