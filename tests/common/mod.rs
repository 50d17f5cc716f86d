// Shared test helpers for integration tests
#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use suite_runner::config::TestCase;
use suite_runner::models::{TestCaseResult, TestRun};

/// The shell used to run test scripts. Scripts are passed as an argument
/// rather than executed directly, so they never need the executable bit.
pub const SHELL: &str = "/bin/sh";

/// Writes a shell script into `dir` and returns its absolute path.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write script");
    path
}

/// A script body that prints a sub-case report with the given scans.
/// Each scan is `(id, passed)`; the first scan carries explicit timestamps,
/// the others inherit the parent's window.
pub fn report_script(overall_passed: bool, scans: &[(&str, bool)]) -> String {
    let entries: Vec<String> = scans
        .iter()
        .enumerate()
        .map(|(i, (id, passed))| {
            if i == 0 {
                format!(
                    r#"{{"id": "{}", "scan_starttime": "2024-01-01T10:00:00Z", "scan_endtime": "2024-01-01T10:00:02Z", "test": "check-{}", "test_passed": {}, "data": "details of {}"}}"#,
                    id, id, passed, id
                )
            } else {
                format!(
                    r#"{{"id": "{}", "test": "check-{}", "test_passed": {}, "data": ""}}"#,
                    id, id, passed
                )
            }
        })
        .collect();
    format!(
        "cat <<'EOF'\n{{\"starttime\": \"2024-01-01T10:00:00Z\", \"endtime\": \"2024-01-01T10:00:03Z\", \"overall_passed\": {}, \"combined_scan_results\": [{}]}}\nEOF",
        overall_passed,
        entries.join(", ")
    )
}

/// Builds a case that runs `script` through the shell.
pub fn shell_case(id: &str, suites: &str, script: &Path, timeout_secs: i64) -> TestCase {
    TestCase {
        name: format!("{} name", id),
        id: id.to_string(),
        associated_suites: suites.to_string(),
        program: SHELL.to_string(),
        cli_parameters: script.display().to_string(),
        timeout_secs,
        ..TestCase::default()
    }
}

/// Writes a `testcases.json` document into `dir`.
pub fn write_config(dir: &Path, root: &str, cases: &[TestCase]) -> PathBuf {
    let config = serde_json::json!({
        "testsuite_root": root,
        "author": "qa",
        "modified_timestamp": "2024-01-01",
        "testcases": cases,
        "testsuites": [
            {
                "testsuite_name": "Complete",
                "testsuite_id": "complete",
                "testsuite_alias": "all",
                "testsuite_description": "Every test case"
            }
        ]
    });
    let path = dir.join("testcases.json");
    fs::write(&path, serde_json::to_string_pretty(&config).expect("Failed to encode config"))
        .expect("Failed to write config");
    path
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap() + TimeDelta::seconds(secs)
}

/// A stamped top-level result lasting `millis` milliseconds.
pub fn result(id: &str, millis: i64, passed: bool, timed_out: bool) -> TestCaseResult {
    let mut r = TestCaseResult::new(id);
    r.start_time = at(0);
    r.end_time = at(0) + TimeDelta::milliseconds(millis);
    r.passed = passed;
    r.timed_out = timed_out;
    r.cmd_line = format!("./{} ", id);
    r
}

/// A sub-case result already nested under `parent`.
pub fn sub_result(parent: &str, id: &str, millis: i64, passed: bool) -> TestCaseResult {
    let mut r = result(id, millis, passed, false);
    r.nest_under(parent);
    r
}

/// A finished run holding `results`, spanning ten seconds.
pub fn run_with(run_id: &str, results: Vec<TestCaseResult>) -> TestRun {
    let mut run = TestRun::new("/suite/testcases.json", Vec::new());
    run.run_id = run_id.to_string();
    run.start_time = at(0);
    run.end_time = at(10);
    run.executed_test_results = results;
    run
}
