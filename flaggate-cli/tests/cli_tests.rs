use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Home directory holding a `.split` override file
fn override_home(contents: &str) -> TempDir {
    let home = TempDir::new().expect("Failed to create temp home");
    std::fs::write(home.path().join(".split"), contents).expect("Failed to write .split");
    home
}

pub fn run_flaggate(home: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_flaggate"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run flaggate");

    // The binary may exit before reading everything it was sent
    let _ = child
        .stdin
        .take()
        .expect("stdin not piped")
        .write_all(stdin.as_bytes());

    child.wait_with_output().expect("Failed to wait for flaggate")
}

#[test]
fn test_missing_token_is_usage_error() {
    let home = override_home("flagA on\n");
    let output = run_flaggate(home.path(), &[], "");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_extra_argument_is_usage_error() {
    let home = override_home("flagA on\n");
    let output = run_flaggate(home.path(), &["localhost", "extra"], "");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_localhost_evaluates_stdin_until_exit() {
    let home = override_home("flagA on\n");
    let output = run_flaggate(
        home.path(),
        &["localhost"],
        "user1 flagA\nonly\nexit\nuser1 flagA\n",
    );

    assert!(
        output.status.success(),
        "flaggate failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "on\nCould not understand command\n"
    );
}

#[test]
fn test_localhost_end_of_input_exits_cleanly() {
    let home = override_home("flagA on\nflagB off\n");
    let output = run_flaggate(home.path(), &["localhost"], "user1 flagB\n");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "off\n");
}

#[test]
fn test_localhost_without_override_file_fails() {
    let home = TempDir::new().expect("Failed to create temp home");
    let output = run_flaggate(home.path(), &["localhost"], "user1 flagA\n");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
