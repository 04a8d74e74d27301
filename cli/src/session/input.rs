//! # Session Input
//!
//! File: cli/src/session/input.rs
//!
//! ## Overview
//!
//! The session loop pulls `InputEvent`s from an `InputSource`. On the console
//! that source is fed by two channels:
//!
//! - a feeder thread that reads stdin line by line, and
//! - a Ctrl+C handler (`ctrlc`) that reports interrupts.
//!
//! Waiting on both with `crossbeam_channel::select!` means an interrupt is
//! seen immediately even while the user has not finished typing a line. The
//! feeder thread never touches session state; it only forwards text.
//!
//! Tests drive the loop with `ScriptedInput` instead.
//!
use crate::core::error::Result;
use anyhow::{anyhow, Context};
use crossbeam_channel::{bounded, select, unbounded, Receiver, RecvError, Sender};
#[cfg(test)]
use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::thread;
use tracing::debug;

/// What the user did next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A full line, without its trailing newline.
    Line(String),
    /// Ctrl+C was pressed.
    Interrupted,
    /// Input reached end-of-file.
    Closed,
}

/// A source of input events for the session loop.
pub trait InputSource {
    /// Blocks until the next event is available.
    fn next_event(&mut self) -> Result<InputEvent>;
}

/// Messages sent from the stdin feeder thread.
#[derive(Debug)]
pub enum FeedMessage {
    Line(String),
    Eof,
    Failed(io::Error),
}

/// Input source backed by a line channel and an interrupt channel.
pub struct ChannelInput {
    lines: Receiver<FeedMessage>,
    interrupts: Receiver<()>,
    closed: bool,
}

impl ChannelInput {
    pub fn new(lines: Receiver<FeedMessage>, interrupts: Receiver<()>) -> Self {
        Self {
            lines,
            interrupts,
            closed: false,
        }
    }

    fn on_line_message(&mut self, message: FeedMessage) -> Result<InputEvent> {
        match message {
            FeedMessage::Line(line) => Ok(InputEvent::Line(line)),
            FeedMessage::Eof => {
                self.closed = true;
                Ok(InputEvent::Closed)
            }
            FeedMessage::Failed(e) => {
                self.closed = true;
                Err(anyhow!(e).context("Failed to read from standard input"))
            }
        }
    }
}

enum Received {
    Interrupt(std::result::Result<(), RecvError>),
    Feed(std::result::Result<FeedMessage, RecvError>),
}

impl InputSource for ChannelInput {
    fn next_event(&mut self) -> Result<InputEvent> {
        // A pending interrupt wins over buffered lines.
        if self.interrupts.try_recv().is_ok() {
            return Ok(InputEvent::Interrupted);
        }
        if self.closed {
            return Ok(InputEvent::Closed);
        }
        let received = select! {
            recv(self.interrupts) -> msg => Received::Interrupt(msg),
            recv(self.lines) -> msg => Received::Feed(msg),
        };
        match received {
            Received::Interrupt(Ok(())) => Ok(InputEvent::Interrupted),
            // Handler gone: keep waiting on lines only.
            Received::Interrupt(Err(_)) => match self.lines.recv() {
                Ok(message) => self.on_line_message(message),
                Err(_) => {
                    self.closed = true;
                    Ok(InputEvent::Closed)
                }
            },
            Received::Feed(Ok(message)) => self.on_line_message(message),
            Received::Feed(Err(_)) => {
                self.closed = true;
                Ok(InputEvent::Closed)
            }
        }
    }
}

/// Reads lines from `reader` and forwards them until EOF, a read error, or
/// the receiving side hangs up.
pub fn feed_lines<R: BufRead>(mut reader: R, tx: Sender<FeedMessage>) {
    let mut buf = String::new();
    loop {
        buf.clear();
        let message = match reader.read_line(&mut buf) {
            Ok(0) => FeedMessage::Eof,
            Ok(_) => FeedMessage::Line(buf.trim_end_matches(['\n', '\r']).to_string()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => FeedMessage::Failed(e),
        };
        let last = !matches!(message, FeedMessage::Line(_));
        if tx.send(message).is_err() || last {
            debug!("stdin feeder stopping");
            return;
        }
    }
}

/// Console input: stdin lines plus Ctrl+C.
///
/// Installs the Ctrl+C handler and starts the stdin feeder thread. Can only
/// be called once per process; `ctrlc` refuses a second handler.
pub fn console_input() -> Result<ChannelInput> {
    let (interrupt_tx, interrupt_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        // A full channel means an interrupt is already pending.
        let _ = interrupt_tx.try_send(());
    })
    .context("Failed to install Ctrl+C handler")?;

    let (line_tx, line_rx) = unbounded();
    thread::Builder::new()
        .name("stdin-feeder".to_string())
        .spawn(move || feed_lines(io::stdin().lock(), line_tx))
        .context("Failed to start stdin reader thread")?;

    Ok(ChannelInput::new(line_rx, interrupt_rx))
}

/// Pre-recorded input for driving the session loop in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

#[cfg(test)]
impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Convenience constructor: each string becomes a `Line` event.
    pub fn lines<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self::new(lines.into_iter().map(|l| InputEvent::Line(l.into())))
    }
}

#[cfg(test)]
impl InputSource for ScriptedInput {
    fn next_event(&mut self) -> Result<InputEvent> {
        Ok(self.events.pop_front().unwrap_or(InputEvent::Closed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_feed_lines_strips_newlines_and_reports_eof() {
        let (tx, rx) = unbounded();
        feed_lines(Cursor::new("hello\r\nthere\nlast"), tx);
        let received: Vec<_> = rx.iter().collect();
        assert_eq!(received.len(), 4);
        assert!(matches!(&received[0], FeedMessage::Line(l) if l == "hello"));
        assert!(matches!(&received[1], FeedMessage::Line(l) if l == "there"));
        assert!(matches!(&received[2], FeedMessage::Line(l) if l == "last"));
        assert!(matches!(received[3], FeedMessage::Eof));
    }

    #[test]
    fn test_channel_input_lines_then_closed() {
        let (tx, rx) = unbounded();
        let (_int_tx, int_rx) = bounded::<()>(1);
        feed_lines(Cursor::new("hi\n"), tx);
        let mut input = ChannelInput::new(rx, int_rx);
        assert_eq!(input.next_event().unwrap(), InputEvent::Line("hi".into()));
        assert_eq!(input.next_event().unwrap(), InputEvent::Closed);
        assert_eq!(input.next_event().unwrap(), InputEvent::Closed);
    }

    #[test]
    fn test_pending_interrupt_wins() {
        let (tx, rx) = unbounded();
        let (int_tx, int_rx) = bounded::<()>(1);
        tx.send(FeedMessage::Line("hello".into())).unwrap();
        int_tx.send(()).unwrap();
        let mut input = ChannelInput::new(rx, int_rx);
        assert_eq!(input.next_event().unwrap(), InputEvent::Interrupted);
        assert_eq!(input.next_event().unwrap(), InputEvent::Line("hello".into()));
    }

    #[test]
    fn test_interrupt_while_waiting() {
        let (_tx, rx) = unbounded::<FeedMessage>();
        let (int_tx, int_rx) = bounded::<()>(1);
        let mut input = ChannelInput::new(rx, int_rx);
        let handle = thread::spawn(move || {
            thread::sleep(std::time::Duration::from_millis(20));
            int_tx.send(()).unwrap();
        });
        assert_eq!(input.next_event().unwrap(), InputEvent::Interrupted);
        handle.join().unwrap();
    }

    #[test]
    fn test_read_failure_is_an_error() {
        let (tx, rx) = unbounded();
        let (_int_tx, int_rx) = bounded::<()>(1);
        tx.send(FeedMessage::Failed(io::Error::new(
            io::ErrorKind::InvalidData,
            "stream did not contain valid UTF-8",
        )))
        .unwrap();
        let mut input = ChannelInput::new(rx, int_rx);
        let err = input.next_event().unwrap_err();
        assert!(err.to_string().contains("standard input"));
    }

    #[test]
    fn test_scripted_input_runs_out() {
        let mut input = ScriptedInput::lines(["one"]);
        assert_eq!(input.next_event().unwrap(), InputEvent::Line("one".into()));
        assert_eq!(input.next_event().unwrap(), InputEvent::Closed);
    }
}
