use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::{tempdir, NamedTempFile};

fn tur(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tur"))
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("failed to run tur")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn program_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn builtin_binary_addition_is_accepted() {
    let output = tur(&["--builtin", "binary addition"]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("1111_____"));
    assert_eq!(lines.next(), Some("Accepted after 41 steps."));
}

#[test]
fn palindrome_rejects_input_override() {
    let output = tur(&["--builtin", "Palindrome checker", "--input", "ab"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Rejected after 4 steps."));
}

#[test]
fn step_limit_has_its_own_exit_code() {
    let output = tur(&["--builtin", "binary addition", "--limit", "1"]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(2));
    assert!(text.starts_with("1000_111\n"));
    assert!(text.contains("step limit of 1 exceeded in state q1"));
}

#[test]
fn missing_transition_has_its_own_exit_code() {
    let file = program_file("name: Stuck\ntape: 1\nrules:\n  q0:\n    0, R, q0\n");
    let output = tur(&["--program", file.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stdout(&output).contains("no transition for state q0 reading '1'"));
}

#[test]
fn invalid_program_is_an_error() {
    let file = program_file("name: Broken\ntape: 1\n");
    let output = tur(&["--program", file.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn zero_limit_is_an_error() {
    let output = tur(&["--builtin", "binary addition", "--limit", "0"]);

    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("step limit must be positive"));
}

#[test]
fn missing_file_is_an_error() {
    let output = tur(&["--program", "/nonexistent/program.tur"]);

    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn json_report_is_machine_readable() {
    let output = tur(&["--builtin", "binary increment", "--json"]);
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(report["outcome"], "Accepted");
    assert_eq!(report["steps"], 9);
    assert_eq!(report["tape"].as_array().unwrap().len(), 6);
}

#[test]
fn debug_prints_every_step() {
    let output = tur(&["--builtin", "binary increment", "--debug"]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(text.contains("Step: 0, State: "));
    assert!(text.contains("Step: 9, State: accept"));
}

#[test]
fn program_can_be_piped_on_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tur"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"name: Flip\ntape: 0\nrules:\n  q0:\n    0 -> 1, R, accept\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("1\nAccepted after 1 steps."));
}

#[test]
fn list_shows_builtin_programs() {
    let output = tur(&["--list"]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(text.contains("Binary addition"));
    assert!(text.contains("Palindrome checker"));
    assert!(text.contains("Endless march"));
}

#[test]
fn invalid_flag_value_is_an_error() {
    let output = tur(&["--builtin", "binary addition", "--limit", "abc"]);

    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid value 'abc'"));
}

#[test]
fn unknown_flag_is_an_error() {
    let output = tur(&["--frobnicate"]);

    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn help_exits_successfully() {
    let output = tur(&["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("EXIT STATUS"));
}

#[test]
fn list_shows_programs_in_directory() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("flip.tur"),
        "name: Flip\ntape: 0\nrules:\n  start:\n    0 -> 1, R, accept\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("broken.tur"), "name: Broken\n").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a program").unwrap();

    let output = tur(&["--list", "--program", dir.path().to_str().unwrap()]);
    let text = stdout(&output);
    let errors = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0));
    assert!(text.contains("Flip"));
    assert!(text.contains("flip.tur"));
    assert!(!text.contains("notes.txt"));
    assert!(errors.contains("broken.tur"));
}

#[test]
fn running_a_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let output = tur(&["--program", dir.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("is a directory"));
}
