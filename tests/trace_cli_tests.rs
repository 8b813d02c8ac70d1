//! End-to-end tests driving the modtrace binary with JSON-lines events
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write `x.py` whose line 10 is `def x():` and line 11 is `y = 1`
fn write_source(dir: &Path) -> String {
    let mut lines = vec!["".to_string(); 11];
    lines[9] = "def x():".into();
    lines[10] = "y = 1".into();
    let path = dir.join("x.py");
    fs::write(&path, lines.join("\n") + "\n").unwrap();
    path.to_str().unwrap().to_string()
}

fn event(kind: &str, module: &str, file: &str, line: u32) -> String {
    serde_json::json!({ "kind": kind, "module": module, "file": file, "line": line }).to_string()
}

fn call_line_return(module: &str, file: &str) -> String {
    [
        event("call", module, file, 10),
        event("line", module, file, 11),
        event("return", module, file, 10),
    ]
    .join("\n")
        + "\n"
}

#[test]
fn test_good_list_emits_single_line() {
    let dir = TempDir::new().unwrap();
    let file = write_source(dir.path());

    let mut cmd = Command::cargo_bin("modtrace").unwrap();
    cmd.arg("--good")
        .arg("myapp")
        .write_stdin(call_line_return("myapp", &file))
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::eq("01->myapp:11: y = 1\n"));
}

#[test]
fn test_rejected_module_emits_nothing() {
    let dir = TempDir::new().unwrap();
    let file = write_source(dir.path());

    let mut cmd = Command::cargo_bin("modtrace").unwrap();
    cmd.arg("--good")
        .arg("myapp")
        .arg("--summary")
        .write_stdin(call_line_return("otherlib.mod", &file))
        .assert()
        .success()
        .stderr(predicate::str::contains("->").not())
        .stderr(predicate::str::contains(
            "3 events, 0 emitted, 3 rejected, 0 malformed, final depth 0",
        ));
}

#[test]
fn test_calls_only_to_output_file() {
    let dir = TempDir::new().unwrap();
    let file = write_source(dir.path());
    let out = dir.path().join("trace.log");

    let mut cmd = Command::cargo_bin("modtrace").unwrap();
    cmd.arg("--calls-only")
        .arg("-o")
        .arg(&out)
        .write_stdin(call_line_return("myapp", &file))
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&out).unwrap(), "01->myapp:10: def x():\n");
}

#[test]
fn test_module_only_from_events_file() {
    let dir = TempDir::new().unwrap();
    let file = write_source(dir.path());
    let events = dir.path().join("events.jsonl");
    let stream = [
        event("call", "a", &file, 10),
        event("line", "a", &file, 11),
        event("line", "a", &file, 11),
        event("call", "b", &file, 10),
        event("line", "b", &file, 11),
        event("return", "b", &file, 10),
        event("line", "a", &file, 11),
    ]
    .join("\n");
    fs::write(&events, stream).unwrap();

    let mut cmd = Command::cargo_bin("modtrace").unwrap();
    cmd.arg("--module-only")
        .arg("--events")
        .arg(&events)
        .assert()
        .success()
        .stderr(predicate::eq("01->a\n02-->b\n01->a\n"));
}

#[test]
fn test_stdlib_hidden_unless_included() {
    let dir = TempDir::new().unwrap();
    let file = write_source(dir.path());
    let stream = call_line_return("posixpath", &file);

    Command::cargo_bin("modtrace")
        .unwrap()
        .write_stdin(stream.clone())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    Command::cargo_bin("modtrace")
        .unwrap()
        .arg("--include-stdlib")
        .write_stdin(stream)
        .assert()
        .success()
        .stderr(predicate::eq("01->posixpath:11: y = 1\n"));
}

#[test]
fn test_presets_from_tables_file() {
    let dir = TempDir::new().unwrap();
    let file = write_source(dir.path());
    let tables = dir.path().join("tables.toml");
    fs::write(
        &tables,
        "[good_presets]\nweb = [\"myapp.views\"]\n\n[bad_presets]\nslow = [\"myapp.views.admin\"]\n",
    )
    .unwrap();
    let stream = [
        call_line_return("myapp.views", &file),
        call_line_return("myapp.views.admin", &file),
        call_line_return("myapp.models", &file),
    ]
    .concat();

    let mut cmd = Command::cargo_bin("modtrace").unwrap();
    cmd.arg("--tables")
        .arg(&tables)
        .arg("--good-preset")
        .arg("web")
        .arg("--bad-preset")
        .arg("slow")
        .write_stdin(stream)
        .assert()
        .success()
        .stderr(predicate::eq("01->myapp.views:11: y = 1\n"));
}

#[test]
fn test_bad_regex_beats_good_list() {
    let dir = TempDir::new().unwrap();
    let file = write_source(dir.path());
    let stream = [
        call_line_return("myapp.views", &file),
        call_line_return("myapp.tests", &file),
    ]
    .concat();

    let mut cmd = Command::cargo_bin("modtrace").unwrap();
    cmd.arg("--good")
        .arg("myapp")
        .arg("--bad-regex")
        .arg(r"\.tests$")
        .write_stdin(stream)
        .assert()
        .success()
        .stderr(predicate::eq("01->myapp.views:11: y = 1\n"));
}

#[test]
fn test_invalid_regex_fails_before_tracing() {
    let mut cmd = Command::cargo_bin("modtrace").unwrap();
    cmd.arg("--good-regex")
        .arg("[invalid")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("regex"));
}

#[test]
fn test_invalid_tables_file_fails() {
    let dir = TempDir::new().unwrap();
    let tables = dir.path().join("tables.toml");
    fs::write(&tables, "good_presets = [broken").unwrap();

    let mut cmd = Command::cargo_bin("modtrace").unwrap();
    cmd.arg("--tables")
        .arg(&tables)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("lookup tables"));
}

#[test]
fn test_malformed_events_are_skipped() {
    let dir = TempDir::new().unwrap();
    let file = write_source(dir.path());
    let stream = format!("garbage\n{}", call_line_return("myapp", &file));

    let mut cmd = Command::cargo_bin("modtrace").unwrap();
    cmd.arg("--summary")
        .write_stdin(stream)
        .assert()
        .success()
        .stderr(predicate::str::contains("01->myapp:11: y = 1\n"))
        .stderr(predicate::str::contains("1 malformed"));
}

#[test]
fn test_compiled_artifact_resolves_source() {
    let dir = TempDir::new().unwrap();
    let file = write_source(dir.path());
    let compiled = format!("{file}c");

    let mut cmd = Command::cargo_bin("modtrace").unwrap();
    cmd.write_stdin(call_line_return("myapp", &compiled))
        .assert()
        .success()
        .stderr(predicate::eq("01->myapp:11: y = 1\n"));
}

#[test]
fn test_leading_return_renders_negative_depth() {
    let dir = TempDir::new().unwrap();
    let file = write_source(dir.path());
    let stream = [
        event("return", "myapp", &file, 10),
        event("line", "myapp", &file, 11),
        event("call", "myapp", &file, 10),
        event("call", "myapp", &file, 10),
        event("line", "myapp", &file, 11),
    ]
    .join("\n");

    let mut cmd = Command::cargo_bin("modtrace").unwrap();
    cmd.arg("--summary")
        .write_stdin(stream)
        .assert()
        .success()
        .stderr(predicate::str::starts_with(
            "-1>myapp:11: y = 1\n01->myapp:11: y = 1\n",
        ))
        .stderr(predicate::str::contains("final depth 1"));
}

#[test]
fn test_stdlib_submodules_hidden_by_default() {
    let dir = TempDir::new().unwrap();
    let file = write_source(dir.path());

    let mut cmd = Command::cargo_bin("modtrace").unwrap();
    cmd.write_stdin(call_line_return("asyncio.events", &file))
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
