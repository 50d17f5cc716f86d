//! # Data Models Module / 数据模型模块
//!
//! This module defines the result model of the harness: the outcome of a
//! single case (optionally nested under a parent case), a complete run, and
//! the per-case error taxonomy.
//!
//! 此模块定义测试框架的结果模型：单个用例的结果（可选地嵌套在父用例下）、
//! 完整的运行以及每个用例的错误分类。

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::core::config::TestCase;
use crate::core::report::ReportParseError;
use crate::infra::{command::LaunchError, fs};

/// Enumerates why a single case did not produce a clean outcome.
/// None of these abort the run; they are recorded against the case.
///
/// 枚举单个用例未能产生正常结果的原因。
/// 这些错误都不会中止运行，它们会被记录在对应用例上。
#[derive(Debug, Error)]
pub enum CaseError {
    /// The pre-run hook failed, so the main program was never started.
    /// 预运行钩子失败，因此主程序从未启动。
    #[error("test case {id} pre-run steps [{command}] failed: {source}")]
    PrerunFailed {
        id: String,
        command: String,
        #[source]
        source: LaunchError,
    },

    /// The post-run hook failed. The main outcome is kept on the result.
    /// 后运行钩子失败。主结果仍保留在结果中。
    #[error("test case {id} post-run steps [{command}] failed: {source}")]
    PostrunFailed {
        id: String,
        command: String,
        #[source]
        source: LaunchError,
    },

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error("test case {id} timed out after {timeout_secs}s")]
    TimedOut { id: String, timeout_secs: i64 },

    #[error("test case {id} produced an unparsable result: {source}")]
    ResultParse {
        id: String,
        #[source]
        source: ReportParseError,
    },
}

/// The classification of a top-level outcome, with precedence
/// timed-out > passed > failed.
///
/// 顶层结果的分类，优先级为 超时 > 通过 > 失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    Passed,
    Failed,
    TimedOut,
}

impl CaseStatus {
    /// Fixed-width marker used in comparison tables.
    pub fn marker(self) -> &'static str {
        match self {
            CaseStatus::Passed => "+++++",
            CaseStatus::Failed => "-----",
            CaseStatus::TimedOut => "TTTTT",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CaseStatus::Passed => "PASSED",
            CaseStatus::Failed => "FAILED",
            CaseStatus::TimedOut => "TIMED OUT",
        };
        f.write_str(label)
    }
}

/// The recorded outcome of one case or sub-case.
///
/// 一个用例或子用例的记录结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseResult {
    /// Case id; sub-cases are namespaced as `parentId:childId`.
    /// 用例 ID；子用例的命名空间形式为 `parentId:childId`。
    #[serde(rename = "testcase_result_id")]
    pub id: String,
    #[serde(rename = "testcase_result_starttime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "testcase_result_endtime")]
    pub end_time: DateTime<Utc>,
    /// The command line actually invoked, for display.
    /// 实际调用的命令行，仅用于显示。
    #[serde(rename = "testcase_result_cmdline", default)]
    pub cmd_line: String,
    #[serde(rename = "testcase_result_passed", default)]
    pub passed: bool,
    #[serde(rename = "testcase_result_timed_out", default)]
    pub timed_out: bool,
    #[serde(rename = "testcase_result_data", default)]
    pub data: String,
    /// Empty for top-level cases.
    /// 顶层用例为空字符串。
    #[serde(rename = "testcase_parent_id", default)]
    pub parent_id: String,
}

impl TestCaseResult {
    /// Creates an unstamped result for the given case id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start_time: DateTime::<Utc>::default(),
            end_time: DateTime::<Utc>::default(),
            cmd_line: String::new(),
            passed: false,
            timed_out: false,
            data: String::new(),
            parent_id: String::new(),
        }
    }

    pub fn start_test(&mut self) {
        self.start_time = Utc::now();
    }

    pub fn end_test(&mut self) {
        self.end_time = Utc::now();
    }

    /// Marks the result as timed out. A timed-out case never counts as passed.
    /// 将结果标记为超时。超时的用例永远不会被视为通过。
    pub fn mark_timed_out(&mut self) {
        self.timed_out = true;
        self.passed = false;
    }

    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }

    pub fn status(&self) -> CaseStatus {
        if self.timed_out {
            CaseStatus::TimedOut
        } else if self.passed {
            CaseStatus::Passed
        } else {
            CaseStatus::Failed
        }
    }

    pub fn is_sub_case(&self) -> bool {
        !self.parent_id.is_empty()
    }

    /// Re-parents this result under `parent_id`, namespacing its id.
    ///
    /// 将此结果重新挂到 `parent_id` 下，并为其 ID 添加命名空间。
    pub fn nest_under(&mut self, parent_id: &str) {
        self.id = format!("{}:{}", parent_id, self.id);
        self.parent_id = parent_id.to_string();
    }
}

/// A typed view over one entry of a run's flat result list.
///
/// 运行的扁平结果列表中单个条目的类型化视图。
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    TopLevel(&'a TestCaseResult),
    SubCase {
        result: &'a TestCaseResult,
        parent_id: &'a str,
    },
}

impl<'a> Outcome<'a> {
    pub fn result(&self) -> &'a TestCaseResult {
        match *self {
            Outcome::TopLevel(result) => result,
            Outcome::SubCase { result, .. } => result,
        }
    }
}

impl<'a> From<&'a TestCaseResult> for Outcome<'a> {
    fn from(result: &'a TestCaseResult) -> Self {
        if result.is_sub_case() {
            Outcome::SubCase {
                result,
                parent_id: &result.parent_id,
            }
        } else {
            Outcome::TopLevel(result)
        }
    }
}

/// One complete execution of a selected set of cases.
///
/// 对选定用例集合的一次完整执行。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRun {
    #[serde(rename = "testrun_id")]
    pub run_id: String,
    /// Absolute path of the configuration the run was built from.
    /// 生成此运行所用配置的绝对路径。
    #[serde(rename = "testrun_config", default)]
    pub config: String,
    #[serde(rename = "testrun_startime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "testrun_endtime")]
    pub end_time: DateTime<Utc>,
    #[serde(rename = "testrun_testcases", default)]
    pub test_cases: Vec<TestCase>,
    /// Top-level results, each immediately followed by its sub-case results.
    /// 顶层结果，每个结果后面紧跟其子用例结果。
    #[serde(rename = "testrun_executed_test_results", default)]
    pub executed_test_results: Vec<TestCaseResult>,
}

impl TestRun {
    pub fn new(config: impl Into<String>, test_cases: Vec<TestCase>) -> Self {
        Self {
            config: config.into(),
            test_cases,
            ..Self::default()
        }
    }

    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }

    /// Stamps the end time and derives the run identifier from the selector
    /// and both timestamps. Path separators in the selector become `_`, since
    /// the id doubles as the default output file name.
    ///
    /// 记录结束时间，并根据选择器和两个时间戳生成运行标识符。
    /// 选择器中的路径分隔符会替换为 `_`，因为该标识符也是默认的输出文件名。
    pub fn finalize(&mut self, selector: &str) {
        self.end_time = Utc::now();
        self.run_id = format!(
            "Run-{}-{}-{}",
            selector.replace(['/', '\\'], "_"),
            self.start_time.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.end_time.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }

    /// True once `finalize` has stamped a run id.
    pub fn is_finalized(&self) -> bool {
        !self.run_id.is_empty()
    }

    pub fn outcomes(&self) -> impl Iterator<Item = Outcome<'_>> {
        self.executed_test_results.iter().map(Outcome::from)
    }

    /// Returns the ids of sub-cases whose parent does not appear earlier in the list.
    ///
    /// 返回其父用例未在列表中更早出现的子用例 ID。
    pub fn orphan_sub_cases(&self) -> Vec<&str> {
        let mut seen_parents = std::collections::HashSet::new();
        let mut orphans = Vec::new();
        for outcome in self.outcomes() {
            match outcome {
                Outcome::TopLevel(result) => {
                    seen_parents.insert(result.id.as_str());
                }
                Outcome::SubCase { result, parent_id } => {
                    if !seen_parents.contains(parent_id) {
                        orphans.push(result.id.as_str());
                    }
                }
            }
        }
        orphans
    }

    /// Writes the run as JSON to `dir/filename`.
    /// `dir` defaults to the current directory and `filename` to the run id.
    ///
    /// 将运行以 JSON 格式写入 `dir/filename`。
    /// `dir` 默认为当前目录，`filename` 默认为运行 ID。
    pub fn save(&self, dir: Option<&Path>, filename: Option<&str>) -> Result<PathBuf> {
        let path = fs::output_path(dir, filename, &self.run_id);
        fs::write_json(&path, self)
            .with_context(|| format!("Failed to persist test run '{}'", self.run_id))?;
        Ok(path)
    }

    /// Reads a persisted run back from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let run: TestRun = fs::read_json(path)
            .with_context(|| format!("Failed to load test run from {}", path.display()))?;
        let orphans = run.orphan_sub_cases();
        if !orphans.is_empty() {
            warn!(
                run_id = %run.run_id,
                orphans = ?orphans,
                "test run contains sub-case results without a preceding parent"
            );
        }
        Ok(run)
    }
}

/// Formats a signed duration as seconds with millisecond precision, e.g. `1.250s`.
///
/// 将有符号的持续时间格式化为毫秒精度的秒数，例如 `1.250s`。
pub fn format_duration(duration: TimeDelta) -> String {
    format!("{:.3}s", duration.num_milliseconds() as f64 / 1000.0)
}
