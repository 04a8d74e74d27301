//! # RoboChat Chat Integration Tests
//!
//! File: cli/tests/chat.rs
//!
//! ## Overview
//!
//! Drives `robochat chat` through piped stdin and checks the console output,
//! the chat history file, and the data files created along the way.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

const FAREWELL: &str = "Robot: Goodbye, rey! See you next time!";

fn farewell_count(history: &str) -> usize {
    history.lines().filter(|l| l.ends_with(FAREWELL)).count()
}

#[test]
fn test_hello_there_then_exit() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["chat", "--no-demo"])
        .write_stdin("hello there\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Robot guesses: 'greet' intent"))
        .stdout(predicate::str::contains(FAREWELL));

    let history = sandbox.read(&sandbox.history());
    assert!(history.contains("] You: hello there\n"));
    assert!(history.contains("] Robot guesses: 'greet' intent\n"));
    assert!(history.contains("] You: exit\n"));
    assert_eq!(farewell_count(&history), 1);
    assert!(history.ends_with(&format!("{}\n{}\n", FAREWELL, "-".repeat(50))));
}

#[test]
fn test_exit_is_case_insensitive() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["chat", "--no-demo"])
        .write_stdin("what's the weather in Texas\n   EXIT  \nhello\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Robot guesses: 'ask_weather' intent"));

    let history = sandbox.read(&sandbox.history());
    assert!(history.contains("] You: EXIT\n"));
    assert!(!history.contains("You: hello"));
    assert_eq!(farewell_count(&history), 1);
}

#[test]
fn test_end_of_input_ends_gracefully() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["chat", "--no-demo"])
        .write_stdin("tell me a joke\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Robot guesses: 'tell_joke' intent"));

    let history = sandbox.read(&sandbox.history());
    assert!(history.contains("] You: [End of input]\n"));
    assert_eq!(farewell_count(&history), 1);
}

#[test]
fn test_custom_exit_keyword() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["chat", "--no-demo", "--exit-keyword", "bye"])
        .write_stdin("exit\nBye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Type 'bye' to stop."));

    let history = sandbox.read(&sandbox.history());
    assert!(history.contains("] You: exit\n"));
    assert!(history.contains("] You: Bye\n"));
    assert_eq!(farewell_count(&history), 1);
}

#[test]
fn test_second_session_backs_up_and_appends() {
    let sandbox = Sandbox::new();
    for _ in 0..2 {
        sandbox
            .cmd()
            .args(["chat", "--no-demo"])
            .write_stdin("hi\nexit\n")
            .assert()
            .success();
    }

    let history = sandbox.read(&sandbox.history());
    assert_eq!(farewell_count(&history), 2);
    let history_backup = sandbox.file("chat_history.txt.backup");
    assert_eq!(farewell_count(&sandbox.read(&history_backup)), 1);
    assert!(sandbox.file("responses.json.backup").is_file());
}

#[test]
fn test_corrupt_model_is_retrained() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.data_dir()).unwrap();
    fs::write(sandbox.model(), b"garbage bytes").unwrap();

    sandbox
        .cmd()
        .args(["chat", "--no-demo"])
        .write_stdin("hello there\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Retraining"))
        .stdout(predicate::str::contains("Robot guesses: 'greet' intent"));

    assert_eq!(
        fs::read(sandbox.file("chatbot_model.bin.backup")).unwrap(),
        b"garbage bytes".to_vec()
    );
    assert_ne!(fs::read(sandbox.model()).unwrap(), b"garbage bytes".to_vec());
}

#[test]
fn test_invalid_responses_fall_back_to_builtin() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.data_dir()).unwrap();
    fs::write(sandbox.responses(), "{ this is not json").unwrap();

    sandbox
        .cmd()
        .args(["chat", "--no-demo"])
        .write_stdin("hello there\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Using built-in responses"))
        .stdout(predicate::str::contains("Robot guesses: 'greet' intent"));

    assert_eq!(sandbox.read(&sandbox.responses()), "{ this is not json");
}

#[test]
fn test_custom_responses_are_used() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.data_dir()).unwrap();
    fs::write(
        sandbox.responses(),
        r#"{"greet": ["Ahoy, matey!"], "default": ["Arr?"]}"#,
    )
    .unwrap();

    sandbox
        .cmd()
        .args(["chat", "--no-demo"])
        .write_stdin("hello there\ntell me a joke\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Robot says: Ahoy, matey!"))
        .stdout(predicate::str::contains("Robot says: Arr?"));
}

#[test]
fn test_retrain_flag_backs_up_model() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["train"]).assert().success();

    sandbox
        .cmd()
        .args(["chat", "--no-demo", "--retrain"])
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Training a new model"));
    assert!(sandbox.file("chatbot_model.bin.backup").is_file());
}

#[test]
fn test_table_without_default_uses_builtin_replies() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.data_dir()).unwrap();
    fs::write(sandbox.responses(), r#"{"greet":["Yo"]}"#).unwrap();

    sandbox
        .cmd()
        .arg("chat")
        .write_stdin("hello\ntell me a joke\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Using built-in responses"))
        .stdout(predicate::str::contains("Robot guesses: 'tell_joke' intent"))
        .stdout(predicate::str::contains("Robot says: Yo").not());

    let history = sandbox.read(&sandbox.history());
    assert!(history.contains("] You: tell me a joke\n"));
    assert_eq!(farewell_count(&history), 1);
    assert_eq!(sandbox.read(&sandbox.responses()), r#"{"greet":["Yo"]}"#);
}

#[cfg(unix)]
#[test]
fn test_ctrl_c_while_waiting_for_input() {
    use std::io::Read;
    use std::process::{Command as StdCommand, Stdio};

    let sandbox = Sandbox::new();
    let mut child = sandbox
        .spawnable()
        .args(["chat", "--no-demo"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    // Held open so the session is blocked on input when the signal lands.
    let stdin = child.stdin.take().unwrap();
    let mut stdout = child.stdout.take().unwrap();

    let mut seen = Vec::new();
    let mut buf = [0u8; 256];
    while !String::from_utf8_lossy(&seen).contains("You: ") {
        let n = stdout.read(&mut buf).unwrap();
        assert!(n > 0, "robochat exited before prompting");
        seen.extend_from_slice(&buf[..n]);
    }

    let kill = StdCommand::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(kill.success());

    stdout.read_to_end(&mut seen).unwrap();
    let status = child.wait().unwrap();
    drop(stdin);

    assert!(status.success(), "exit status was {:?}", status);
    assert!(String::from_utf8_lossy(&seen).contains("Caught a Ctrl+C!"));

    let history = sandbox.read(&sandbox.history());
    let lines: Vec<&str> = history.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("] You: [Interrupted with Ctrl+C]"));
    assert!(lines[1].ends_with(FAREWELL));
    assert_eq!(lines[2], "-".repeat(50));
}
