//! # Models Module Unit Tests / Models 模块单元测试
//!
//! Tests for result classification, sub-case nesting, run identifiers,
//! persistence and the JSON wire names.
//!
//! 结果分类、子用例嵌套、运行标识符、持久化以及 JSON 字段名的测试。

mod common;

use chrono::TimeDelta;
use common::{at, result, run_with, sub_result};
use suite_runner::core::report::SubCaseReport;
use suite_runner::infra::command::LaunchError;
use suite_runner::models::{
    CaseError, CaseStatus, Outcome, TestCaseResult, TestRun, format_duration,
};
use tempfile::tempdir;

#[cfg(test)]
mod status_tests {
    use super::*;

    #[test]
    fn test_status_precedence() {
        assert_eq!(result("a", 10, true, false).status(), CaseStatus::Passed);
        assert_eq!(result("a", 10, false, false).status(), CaseStatus::Failed);
        assert_eq!(result("a", 10, false, true).status(), CaseStatus::TimedOut);
        // Timed-out wins over a stale passed flag.
        assert_eq!(result("a", 10, true, true).status(), CaseStatus::TimedOut);
    }

    #[test]
    fn test_mark_timed_out_clears_passed() {
        let mut r = result("a", 10, true, false);
        r.mark_timed_out();
        assert!(r.timed_out);
        assert!(!r.passed);
    }

    #[test]
    fn test_markers_and_labels() {
        assert_eq!(CaseStatus::Passed.marker(), "+++++");
        assert_eq!(CaseStatus::Failed.marker(), "-----");
        assert_eq!(CaseStatus::TimedOut.marker(), "TTTTT");
        assert_eq!(CaseStatus::TimedOut.to_string(), "TIMED OUT");
    }

    #[test]
    fn test_new_result_is_unstamped() {
        let r = TestCaseResult::new("T1");
        assert_eq!(r.duration(), TimeDelta::zero());
        assert!(!r.passed && !r.timed_out);
        assert!(!r.is_sub_case());
    }
}

#[cfg(test)]
mod nesting_tests {
    use super::*;

    #[test]
    fn test_nest_under_rewrites_id() {
        let mut r = result("scan1", 10, true, false);
        r.nest_under("T1");
        assert_eq!(r.id, "T1:scan1");
        assert_eq!(r.parent_id, "T1");
        assert!(r.is_sub_case());
    }

    #[test]
    fn test_outcome_view() {
        let top = result("T1", 10, true, false);
        let sub = sub_result("T1", "scan1", 10, true);

        assert!(matches!(Outcome::from(&top), Outcome::TopLevel(_)));
        match Outcome::from(&sub) {
            Outcome::SubCase { result, parent_id } => {
                assert_eq!(parent_id, "T1");
                assert_eq!(result.id, "T1:scan1");
            }
            Outcome::TopLevel(_) => panic!("sub-case classified as top-level"),
        }
        assert_eq!(Outcome::from(&sub).result().id, "T1:scan1");
    }

    #[test]
    fn test_orphan_sub_cases() {
        let run = run_with(
            "r",
            vec![
                result("T1", 10, true, false),
                sub_result("T1", "a", 5, true),
                sub_result("T9", "b", 5, true),
                result("T2", 10, true, false),
            ],
        );
        assert_eq!(run.orphan_sub_cases(), vec!["T9:b"]);

        // A parent that only appears later does not count.
        let run = run_with(
            "r",
            vec![sub_result("T1", "a", 5, true), result("T1", 10, true, false)],
        );
        assert_eq!(run.orphan_sub_cases(), vec!["T1:a"]);
    }
}

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn test_finalize_builds_run_id() {
        let mut run = TestRun::new("/suite/testcases.json", Vec::new());
        run.start_time = at(0);
        run.finalize("smoke");

        assert!(run.run_id.starts_with("Run-smoke-2024-01-01T10:00:00Z-"));
        assert!(run.run_id.ends_with('Z'));
        assert!(run.end_time >= run.start_time);
    }

    #[test]
    fn test_run_id_replaces_path_separators_in_selector() {
        let mut run = TestRun::new("/suite/testcases.json", Vec::new());
        run.start_time = at(0);
        run.finalize("net/.*|win\\smoke");

        assert!(run.run_id.starts_with("Run-net_.*|win_smoke-2024-01-01T10:00:00Z-"));
        assert!(!run.run_id.contains(['/', '\\']));
        assert!(run.is_finalized());
    }

    #[test]
    fn test_default_file_name_stays_in_output_dir() {
        let dir = tempdir().unwrap();
        let mut run = TestRun::new("/suite/testcases.json", Vec::new());
        run.finalize("net/dns");

        let path = run.save(Some(dir.path()), None).unwrap();
        assert_eq!(path.parent(), Some(dir.path()));
        assert!(path.is_file());
        assert!(!dir.path().join("Run-net").exists());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let run = run_with(
            "Run-complete-x-y",
            vec![result("T1", 1500, true, false), sub_result("T1", "a", 5, false)],
        );

        let path = run.save(Some(dir.path()), Some("run.json")).unwrap();
        assert_eq!(path, dir.path().join("run.json"));

        let loaded = TestRun::load(&path).unwrap();
        assert_eq!(loaded, run);
    }

    #[test]
    fn test_save_defaults_file_name_to_run_id() {
        let dir = tempdir().unwrap();
        let run = run_with("Run-smoke-a-b", Vec::new());
        let path = run.save(Some(dir.path()), None).unwrap();
        assert_eq!(path.file_name().unwrap(), "Run-smoke-a-b");
        assert!(path.exists());
    }

    #[test]
    fn test_save_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("runs").join("nightly");
        let run = run_with("r", Vec::new());
        let path = run.save(Some(&nested), Some("r.json")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempdir().unwrap();
        assert!(TestRun::load(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn test_wire_names() {
        let run = run_with("r", vec![sub_result("T1", "a", 5, true)]);
        let value = serde_json::to_value(&run).unwrap();

        for key in [
            "testrun_id",
            "testrun_config",
            "testrun_startime",
            "testrun_endtime",
            "testrun_testcases",
            "testrun_executed_test_results",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }

        let first = &value["testrun_executed_test_results"][0];
        assert_eq!(first["testcase_result_id"], "T1:a");
        assert_eq!(first["testcase_parent_id"], "T1");
        for key in [
            "testcase_result_starttime",
            "testcase_result_endtime",
            "testcase_result_cmdline",
            "testcase_result_passed",
            "testcase_result_timed_out",
            "testcase_result_data",
        ] {
            assert!(first.get(key).is_some(), "missing key {key}");
        }
    }
}

#[cfg(test)]
mod format_tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::milliseconds(1250)), "1.250s");
        assert_eq!(format_duration(TimeDelta::zero()), "0.000s");
        assert_eq!(format_duration(TimeDelta::milliseconds(-500)), "-0.500s");
    }

    #[test]
    fn test_case_error_messages() {
        let err = CaseError::TimedOut {
            id: "T1".to_string(),
            timeout_secs: 3,
        };
        assert_eq!(err.to_string(), "test case T1 timed out after 3s");

        let err = CaseError::PrerunFailed {
            id: "T1".to_string(),
            command: "false".to_string(),
            source: LaunchError::EmptyCommand,
        };
        assert!(err.to_string().contains("pre-run steps [false]"));

        let parse = SubCaseReport::parse("nope").unwrap_err();
        let err = CaseError::ResultParse {
            id: "T1".to_string(),
            source: parse,
        };
        assert!(err.to_string().contains("unparsable result"));
    }
}
