//! # RoboChat Session Loop (`session`)
//!
//! File: cli/src/session/mod.rs
//!
//! ## Overview
//!
//! The interactive read-eval-print loop. Each input line is normalized,
//! classified, answered with a random reply for the predicted intent, printed,
//! and appended to the transcript before the next line is read.
//!
//! ## Architecture
//!
//! The loop is a two-state machine:
//!
//! ```text
//!            line != exit keyword
//!          ┌──────────────────────┐
//!          ▼                      │
//!      Running ───────────────────┘
//!          │ exit keyword / Ctrl+C / end of input
//!          ▼
//!      Exiting(reason) ── farewell printed and logged ──> done
//! ```
//!
//! `ChatSession` owns nothing global: the predictor, response table, random
//! number generator, console writer and transcript are all passed in, and
//! input arrives through an `InputSource`. Production wiring lives in
//! `commands::chat`; tests substitute scripted input and in-memory writers.
//!
//! ## Error Handling
//!
//! - A failing prediction is logged and reported, and the loop carries on.
//! - A transcript write failure, a malformed response table, or an unusable
//!   console ends the session with an error.
//!
pub mod input;
pub mod transcript;

use crate::core::error::{ChatbotError, Result};
use crate::nlp::classifier::IntentPredictor;
use crate::nlp::normalize::normalize;
use crate::responses::ResponseTable;
use anyhow::Context;
use chrono::Local;
use input::{InputEvent, InputSource};
use rand::Rng;
use std::io::Write;
use tracing::{debug, error, info};
use transcript::{separator, Transcript, TranscriptSink};

pub const USER_SPEAKER: &str = "You";
pub const ROBOT_SPEAKER: &str = "Robot";
pub const FAREWELL_REPLY: &str = "Goodbye, rey! See you next time!";
pub const INTERRUPT_MARKER: &str = "[Interrupted with Ctrl+C]";
pub const END_OF_INPUT_MARKER: &str = "[End of input]";

/// Why the session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FarewellReason {
    /// The user typed the exit keyword; holds the line as typed (trimmed).
    ExitCommand(String),
    /// Ctrl+C while waiting for input.
    Interrupted,
    /// Standard input was closed.
    EndOfInput,
}

impl FarewellReason {
    /// What the transcript records as the user's final words.
    fn user_text(&self) -> &str {
        match self {
            FarewellReason::ExitCommand(typed) => typed,
            FarewellReason::Interrupted => INTERRUPT_MARKER,
            FarewellReason::EndOfInput => END_OF_INPUT_MARKER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Exiting(FarewellReason),
}

/// Outcome of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Turns answered and logged, not counting the farewell.
    pub turns: usize,
    pub reason: FarewellReason,
}

/// The chatbot's answer to one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub cleaned: String,
    pub intent: String,
    pub text: String,
}

/// Normalizes, classifies and answers a single message.
pub fn respond<P, R>(
    predictor: &P,
    responses: &ResponseTable,
    rng: &mut R,
    message: &str,
) -> Result<Reply>
where
    P: IntentPredictor + ?Sized,
    R: Rng + ?Sized,
{
    let cleaned = normalize(message);
    let intent = predictor.predict(&cleaned)?;
    let text = responses.select(&intent, rng)?.to_string();
    Ok(Reply {
        cleaned,
        intent,
        text,
    })
}

/// Classifies the built-in probe messages and prints the results.
pub fn run_demo<P, R, O>(
    predictor: &P,
    responses: &ResponseTable,
    rng: &mut R,
    console: &mut O,
    messages: &[&str],
) -> Result<()>
where
    P: IntentPredictor + ?Sized,
    R: Rng + ?Sized,
    O: Write + ?Sized,
{
    writeln!(console, "\nLet’s have some fun with the robot!")?;
    for message in messages {
        let reply = respond(predictor, responses, rng, message)?;
        writeln!(console, "User says: '{}'", message)?;
        writeln!(console, "Robot guesses: '{}' intent", reply.intent)?;
        writeln!(console, "Robot says: {}", reply.text)?;
        writeln!(console, "{}", separator())?;
    }
    Ok(())
}

/// One interactive chat session.
pub struct ChatSession<'a, P: ?Sized, R, O, T: TranscriptSink> {
    predictor: &'a P,
    responses: &'a ResponseTable,
    rng: R,
    console: O,
    transcript: Transcript<T>,
    exit_keyword: String,
    turns: usize,
}

impl<'a, P, R, O, T> ChatSession<'a, P, R, O, T>
where
    P: IntentPredictor + ?Sized,
    R: Rng,
    O: Write,
    T: TranscriptSink,
{
    pub fn new(
        predictor: &'a P,
        responses: &'a ResponseTable,
        rng: R,
        console: O,
        transcript: Transcript<T>,
        exit_keyword: &str,
    ) -> Self {
        Self {
            predictor,
            responses,
            rng,
            console,
            transcript,
            exit_keyword: exit_keyword.trim().to_lowercase(),
            turns: 0,
        }
    }

    /// Runs until the exit keyword, an interrupt, or end of input.
    pub fn run<I: InputSource + ?Sized>(&mut self, input: &mut I) -> Result<SessionSummary> {
        writeln!(
            self.console,
            "\nChat with the robot! Type '{}' to stop.",
            self.exit_keyword
        )
        .context("Failed to write to console")?;
        info!("Chat session started");

        loop {
            write!(self.console, "{}: ", USER_SPEAKER)
                .and_then(|_| self.console.flush())
                .context("Failed to write to console")?;
            let event = input.next_event()?;
            match self.step(event)? {
                SessionState::Running => continue,
                SessionState::Exiting(reason) => {
                    self.farewell(&reason)?;
                    info!(
                        "Chat session ended after {} turns ({:?})",
                        self.turns, reason
                    );
                    return Ok(SessionSummary {
                        turns: self.turns,
                        reason,
                    });
                }
            }
        }
    }

    /// Applies one input event and returns the next state.
    pub fn step(&mut self, event: InputEvent) -> Result<SessionState> {
        match event {
            InputEvent::Interrupted => Ok(SessionState::Exiting(FarewellReason::Interrupted)),
            InputEvent::Closed => Ok(SessionState::Exiting(FarewellReason::EndOfInput)),
            InputEvent::Line(line) if self.is_exit(&line) => Ok(SessionState::Exiting(
                FarewellReason::ExitCommand(line.trim().to_string()),
            )),
            InputEvent::Line(line) => {
                self.handle_line(&line)?;
                Ok(SessionState::Running)
            }
        }
    }

    fn is_exit(&self, line: &str) -> bool {
        line.trim().to_lowercase() == self.exit_keyword
    }

    fn handle_line(&mut self, line: &str) -> Result<()> {
        let at = Local::now();
        let cleaned = normalize(line);
        debug!("Cleaned input {:?} -> {:?}", line, cleaned);

        let intent = match self.predictor.predict(&cleaned) {
            Ok(intent) => intent,
            Err(e) => {
                error!("Failed to classify {:?}: {:#}", line, e);
                writeln!(
                    self.console,
                    "{}: Oops, my circuits got tangled on that one. Try again!",
                    ROBOT_SPEAKER
                )
                .context("Failed to write to console")?;
                return Ok(());
            }
        };
        let reply = self.responses.select(&intent, &mut self.rng)?;

        writeln!(self.console, "Robot guesses: '{}' intent", intent)
            .and_then(|_| writeln!(self.console, "Robot says: {}", reply))
            .and_then(|_| writeln!(self.console, "{}", separator()))
            .context("Failed to write to console")?;

        let guess = format!("'{}' intent", intent);
        self.transcript
            .record_turn(
                &at,
                &[
                    (USER_SPEAKER, line),
                    ("Robot guesses", &guess),
                    ("Robot says", reply),
                ],
            )
            .map_err(anyhow::Error::from)?;
        self.turns += 1;
        Ok(())
    }

    fn farewell(&mut self, reason: &FarewellReason) -> Result<()> {
        let at = Local::now();
        let prefix = match reason {
            FarewellReason::Interrupted => "\nRobot: Caught a Ctrl+C! ",
            FarewellReason::EndOfInput => "\nRobot: ",
            FarewellReason::ExitCommand(_) => "Robot: ",
        };
        writeln!(self.console, "{}{}", prefix, FAREWELL_REPLY)
            .context("Failed to write to console")?;

        self.transcript
            .record_turn(
                &at,
                &[
                    (USER_SPEAKER, reason.user_text()),
                    (ROBOT_SPEAKER, FAREWELL_REPLY),
                ],
            )
            .map_err(|e: ChatbotError| anyhow::Error::from(e))
    }

    #[cfg(test)]
    fn into_parts(self) -> (O, T) {
        (self.console, self.transcript.into_inner())
    }
}
