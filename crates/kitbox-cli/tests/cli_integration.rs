//! CLI integration tests for the `kit` binary.
//!
//! Each test runs the compiled binary with `KITBOX_KITS_FILE` pointing into
//! a fresh temp directory, so no real user state is read or written.

use std::path::Path;
use std::process::{Command, Output};

/// Build a `Command` for the `kit` binary using `kits_file` for state.
fn kit_bin(kits_file: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_kit"));
    cmd.env("KITBOX_KITS_FILE", kits_file);
    // Suppress tracing output so assertions only match program output.
    cmd.env("RUST_LOG", "off");
    cmd
}

fn run(kits_file: &Path, args: &[&str]) -> Output {
    kit_bin(kits_file).args(args).output().expect("failed to run kit")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn help_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&dir.path().join("kits.json"), &["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("kitbox slash-command kits CLI"));
}

#[test]
fn list_shows_bundled_kits() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&dir.path().join("kits.json"), &["list"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("memkit"), "got: {out}");
    assert!(out.contains("textkit"), "got: {out}");
}

#[test]
fn enable_persists_across_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let kits_file = dir.path().join("kits.json");

    let output = run(&kits_file, &["enable", "textkit"]);
    assert!(output.status.success(), "enable failed: {output:?}");

    let raw = std::fs::read_to_string(&kits_file).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["enabledKits"], serde_json::json!(["textkit"]));

    let output = run(&kits_file, &["run", "/upper", "hello"]);
    assert!(output.status.success(), "run failed: {output:?}");
    assert_eq!(stdout(&output).trim(), "HELLO");
}

#[test]
fn disabled_kit_commands_are_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let kits_file = dir.path().join("kits.json");

    run(&kits_file, &["enable", "textkit"]);
    let output = run(&kits_file, &["disable", "textkit"]);
    assert!(output.status.success());

    let output = run(&kits_file, &["run", "/upper", "hello"]);
    assert!(!output.status.success());
}

#[test]
fn run_only_uses_kit_without_enabling_it() {
    let dir = tempfile::tempdir().unwrap();
    let kits_file = dir.path().join("kits.json");

    let output = run(&kits_file, &["run", "--only", "textkit", "count", "a b c"]);
    assert!(output.status.success(), "run failed: {output:?}");
    assert_eq!(stdout(&output).trim(), "3 word(s), 5 character(s)");
    assert!(!kits_file.exists(), "scoped run must not persist anything");
}

#[test]
fn unknown_kit_fails() {
    let dir = tempfile::tempdir().unwrap();
    let kits_file = dir.path().join("kits.json");

    assert!(!run(&kits_file, &["enable", "ghost"]).status.success());
    assert!(!run(&kits_file, &["show", "ghost"]).status.success());
    assert!(!run(&kits_file, &["run", "--only", "ghost", "/x"]).status.success());
}

#[test]
fn show_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&dir.path().join("kits.json"), &["show", "memkit"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("/mem-add-text"), "got: {out}");
    assert!(out.contains("Enabled:     no"), "got: {out}");
}

#[test]
fn unwritable_kits_file_warns_and_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let output = run(&blocker.join("kits.json"), &["enable", "textkit"]);
    assert!(!output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("change applies to this session only"), "got: {err}");
    assert!(err.contains("failed to persist kit configuration"), "got: {err}");
}
