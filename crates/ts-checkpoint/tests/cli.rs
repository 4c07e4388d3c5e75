//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Set up a project directory with one source file and a matching report.
///
/// Returns the tempdir; the source file lives at `lib/x.ts` and the report
/// at `errors.txt`, both relative to the tempdir root.
fn project(source: &str, report: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("lib")).unwrap();
    fs::write(tmp.path().join("lib/x.ts"), source).unwrap();
    fs::write(tmp.path().join("errors.txt"), report).unwrap();
    tmp
}

fn source_at(tmp: &TempDir) -> String {
    fs::read_to_string(tmp.path().join("lib/x.ts")).unwrap()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn no_arguments_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_flag_shows_error() {
    cmd()
        .arg("--not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// End-to-End Insertion
// =============================================================================

const SCENARIO_SOURCE: &str = "\
function wrapper() {
  setup();
  // body
  doThing(x);
}
";

const SCENARIO_REPORT: &str =
    "lib/x.ts(4,1): error TS7006: Parameter 'x' implicitly has an 'any' type.\n";

#[test]
fn inserts_message_and_directive_above_error_line() {
    let tmp = project(SCENARIO_SOURCE, SCENARIO_REPORT);

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "errors.txt"])
        .assert()
        .success();

    let edited = source_at(&tmp);
    let lines: Vec<&str> = edited.split('\n').collect();
    assert_eq!(lines[3], "  // Parameter 'x' implicitly has an 'any' type.");
    assert_eq!(lines[4], "  // @ts-expect-error TODO: fix error and remove");
    // The original target shifted down by the block length, unchanged.
    assert_eq!(lines[5], "  doThing(x);");
    assert_eq!(lines[6], "}");
}

#[test]
fn rerun_is_idempotent() {
    let tmp = project(SCENARIO_SOURCE, SCENARIO_REPORT);
    let dir = tmp.path().to_str().unwrap().to_string();

    cmd().args(["-C", &dir, "errors.txt"]).assert().success();
    let after_first = source_at(&tmp);

    cmd().args(["-C", &dir, "errors.txt"]).assert().success();
    assert_eq!(source_at(&tmp), after_first, "second run must not stack directives");
}

#[test]
fn custom_todo_prefix_is_used() {
    let tmp = project(SCENARIO_SOURCE, SCENARIO_REPORT);

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--todo",
            "FIXME",
            "errors.txt",
        ])
        .assert()
        .success();

    assert!(
        source_at(&tmp).contains("// @ts-expect-error FIXME: fix error and remove"),
        "todo prefix should flow into the directive line"
    );
}

#[test]
fn trailing_newline_is_preserved() {
    let tmp = project(SCENARIO_SOURCE, SCENARIO_REPORT);

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "errors.txt"])
        .assert()
        .success();

    assert!(source_at(&tmp).ends_with("}\n"));
}

#[test]
fn report_with_no_diagnostics_touches_nothing() {
    let tmp = project(SCENARIO_SOURCE, "Found 0 errors.\n");

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "errors.txt"])
        .assert()
        .success();

    assert_eq!(source_at(&tmp), SCENARIO_SOURCE);
}

// =============================================================================
// Dry Run
// =============================================================================

#[test]
fn dry_run_writes_nothing() {
    let tmp = project(SCENARIO_SOURCE, SCENARIO_REPORT);

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "--dry", "errors.txt"])
        .assert()
        .success();

    assert_eq!(source_at(&tmp), SCENARIO_SOURCE, "dry run must not modify files");
}

#[test]
fn dry_run_previews_the_insertion() {
    let tmp = project(SCENARIO_SOURCE, SCENARIO_REPORT);

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--color",
            "never",
            "--dry",
            "errors.txt",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("@ts-expect-error TODO: fix error and remove"))
        .stdout(predicate::str::contains("doThing(x);"));
}

#[test]
fn dry_preview_matches_what_a_real_run_inserts() {
    let preview_tmp = project(SCENARIO_SOURCE, SCENARIO_REPORT);
    let real_tmp = project(SCENARIO_SOURCE, SCENARIO_REPORT);

    let preview = cmd()
        .args([
            "-C",
            preview_tmp.path().to_str().unwrap(),
            "--color",
            "never",
            "--dry",
            "errors.txt",
        ])
        .output()
        .unwrap();
    assert!(preview.status.success());
    let preview_stdout = String::from_utf8_lossy(&preview.stdout).to_string();

    cmd()
        .args(["-C", real_tmp.path().to_str().unwrap(), "errors.txt"])
        .assert()
        .success();

    // Every line the preview showed as inserted is present in the real file.
    let edited = source_at(&real_tmp);
    for line in preview_stdout
        .lines()
        .filter(|l| l.contains("// "))
        .map(|l| l.split_once(": ").map_or("", |(_, rest)| rest))
    {
        assert!(edited.contains(line), "preview line missing from file: {line:?}");
    }
}

// =============================================================================
// Sampling
// =============================================================================

#[test]
fn oversized_sample_is_clamped_to_all_diagnostics() {
    let tmp = project(SCENARIO_SOURCE, SCENARIO_REPORT);

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--sample",
            "100",
            "errors.txt",
        ])
        .assert()
        .success();

    assert!(source_at(&tmp).contains("@ts-expect-error"));
}

#[test]
fn sample_restricts_processed_count() {
    let source = "a();\nb();\nc();\nd();\n";
    let report = "\
lib/x.ts(1,1): error TS2304: Cannot find name 'a'.
lib/x.ts(2,1): error TS2304: Cannot find name 'b'.
lib/x.ts(3,1): error TS2304: Cannot find name 'c'.
lib/x.ts(4,1): error TS2304: Cannot find name 'd'.
";
    let tmp = project(source, report);

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--sample",
            "2",
            "--json",
            "--dry",
            "errors.txt",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["diagnostics"], 4);
    assert_eq!(json["processed"], 2);
}

// =============================================================================
// JSON Summary
// =============================================================================

#[test]
fn json_summary_reports_insertions() {
    let tmp = project(SCENARIO_SOURCE, SCENARIO_REPORT);

    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "--json", "errors.txt"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["diagnostics"], 1);
    assert_eq!(json["dry"], false);
    assert_eq!(json["files"][0]["inserted"], 1);
    assert_eq!(json["files"][0]["already_suppressed"], 0);
    assert_eq!(json["config"]["todo_prefix"], "TODO");
}

#[test]
fn json_stdout_stays_parseable_when_preview_flags_are_set() {
    let tmp = project(SCENARIO_SOURCE, SCENARIO_REPORT);

    // --dry and -v normally print the insertion preview; with --json the
    // summary is the only thing on stdout.
    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--dry",
            "-v",
            "--json",
            "errors.txt",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["dry"], true);
    assert_eq!(json["files"][0]["inserted"], 1);
}

#[test]
fn json_summary_counts_idempotent_skips() {
    let tmp = project(SCENARIO_SOURCE, SCENARIO_REPORT);
    let dir = tmp.path().to_str().unwrap().to_string();

    cmd().args(["-C", &dir, "errors.txt"]).assert().success();

    let output = cmd()
        .args(["-C", &dir, "--json", "errors.txt"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["files"][0]["inserted"], 0);
    assert_eq!(json["files"][0]["already_suppressed"], 1);
}

// =============================================================================
// Color Output
// =============================================================================

#[test]
fn color_never_emits_no_ansi_escapes() {
    let tmp = project(SCENARIO_SOURCE, SCENARIO_REPORT);

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--color",
            "never",
            "--dry",
            "errors.txt",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains('\u{1b}'), "escape sequence in output: {stdout:?}");
}

#[test]
fn color_always_forces_ansi_escapes_on_a_pipe() {
    let tmp = project(SCENARIO_SOURCE, SCENARIO_REPORT);

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--color",
            "always",
            "--dry",
            "errors.txt",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\u{1b}["), "expected colored output, got: {stdout:?}");
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn missing_report_file_fails() {
    cmd()
        .arg("/nonexistent/errors.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn missing_source_file_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("errors.txt"),
        "lib/gone.ts(1,1): error TS2304: Cannot find name 'x'.\n",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "errors.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn out_of_range_line_is_skipped_not_fatal() {
    let tmp = project("one();\n", "lib/x.ts(99,1): error TS2304: Cannot find name 'x'.\n");

    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "--json", "errors.txt"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["files"][0]["inserted"], 0);
    assert_eq!(json["files"][0]["out_of_range"], 1);
    assert_eq!(source_at(&tmp), "one();\n");
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "--version-only"])
        .assert()
        .failure();
}

// =============================================================================
// Interactive Fallback
// =============================================================================

#[test]
fn tsx_markup_site_defaults_to_plain_when_not_a_terminal() {
    // Test subprocesses run with stdin not attached to a terminal, so the
    // ambiguous site must resolve to plain comments without blocking.
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("lib")).unwrap();
    fs::write(
        tmp.path().join("lib/view.tsx"),
        "return (\n  <Widget value={count} />\n);\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("errors.txt"),
        "lib/view.tsx(2,3): error TS2322: Type 'string' is not assignable to type 'number'.\n",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "errors.txt"])
        .assert()
        .success();

    let edited = fs::read_to_string(tmp.path().join("lib/view.tsx")).unwrap();
    assert!(edited.contains("  // @ts-expect-error TODO: fix error and remove"));
}
