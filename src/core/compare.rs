//! # Run Comparison Module / 运行比较模块
//!
//! Compares a target run against a comparison (baseline) run. Results are
//! matched by identifier; only matched pairs contribute to the aggregate
//! timing delta.
//!
//! 将目标运行与比较（基线）运行进行比较。结果按标识符匹配；
//! 只有匹配的结果对才计入汇总时间差。

use anyhow::Result;
use chrono::TimeDelta;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::core::models::{CaseStatus, TestCaseResult, TestRun};

/// The status and timing of one result, as shown in a comparison row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSummary {
    pub id: String,
    pub status: CaseStatus,
    pub duration: TimeDelta,
}

impl From<&TestCaseResult> for ResultSummary {
    fn from(result: &TestCaseResult) -> Self {
        Self {
            id: result.id.clone(),
            status: result.status(),
            duration: result.duration(),
        }
    }
}

/// One target result with its counterpart in the comparison run, if any.
///
/// 一个目标结果及其在比较运行中的对应结果（如有）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub target: ResultSummary,
    /// `None` when the comparison run has no result with this id.
    /// 当比较运行中没有此 ID 的结果时为 `None`。
    pub comparison: Option<ResultSummary>,
}

impl ComparisonRow {
    /// Signed delta `target - comparison`, when matched.
    pub fn delta(&self) -> Option<TimeDelta> {
        self.comparison
            .as_ref()
            .map(|c| self.target.duration - c.duration)
    }
}

/// Identity and size of one side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOverview {
    pub run_id: String,
    pub results_executed: usize,
    pub duration: TimeDelta,
}

impl From<&TestRun> for RunOverview {
    fn from(run: &TestRun) -> Self {
        Self {
            run_id: run.run_id.clone(),
            results_executed: run.executed_test_results.len(),
            duration: run.duration(),
        }
    }
}

/// The full comparison report.
///
/// 完整的比较报告。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunComparison {
    pub target: RunOverview,
    pub comparison: RunOverview,
    /// One row per target result, in target order.
    /// 每个目标结果一行，按目标运行的顺序排列。
    pub rows: Vec<ComparisonRow>,
    pub matched_count: usize,
    pub target_total: TimeDelta,
    pub comparison_total: TimeDelta,
    /// Ids present only in the comparison run, in comparison order.
    /// 仅存在于比较运行中的 ID，按比较运行的顺序排列。
    pub removed: Vec<String>,
}

impl RunComparison {
    /// Aggregate delta over matched results.
    pub fn delta(&self) -> TimeDelta {
        self.target_total - self.comparison_total
    }

    /// `100 * delta / comparison_total`, or `None` when the comparison total is zero.
    ///
    /// 当比较总时长为零时返回 `None`，否则返回 `100 * delta / comparison_total`。
    pub fn percent_change(&self) -> Option<f64> {
        let base = as_secs_f64(self.comparison_total);
        if base == 0.0 {
            None
        } else {
            Some(100.0 * as_secs_f64(self.delta()) / base)
        }
    }
}

fn as_secs_f64(duration: TimeDelta) -> f64 {
    duration.num_seconds() as f64 + f64::from(duration.subsec_nanos()) / 1e9
}

/// Compares `target` against `comparison`.
///
/// When an id occurs more than once in the comparison run, its last
/// occurrence is the one matched.
///
/// 将 `target` 与 `comparison` 进行比较。
/// 当某个 ID 在比较运行中出现多次时，匹配其最后一次出现。
pub fn compare_runs(target: &TestRun, comparison: &TestRun) -> RunComparison {
    let lookup: HashMap<&str, &TestCaseResult> = comparison
        .executed_test_results
        .iter()
        .map(|r| (r.id.as_str(), r))
        .collect();

    let mut rows = Vec::with_capacity(target.executed_test_results.len());
    let mut matched_count = 0;
    let mut target_total = TimeDelta::zero();
    let mut comparison_total = TimeDelta::zero();

    for result in &target.executed_test_results {
        let counterpart = lookup.get(result.id.as_str()).copied();
        if let Some(counterpart) = counterpart {
            matched_count += 1;
            target_total = target_total + result.duration();
            comparison_total = comparison_total + counterpart.duration();
        }
        rows.push(ComparisonRow {
            target: result.into(),
            comparison: counterpart.map(ResultSummary::from),
        });
    }

    let target_ids: HashSet<&str> = target
        .executed_test_results
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    let mut seen = HashSet::new();
    let removed = comparison
        .executed_test_results
        .iter()
        .map(|r| r.id.as_str())
        .filter(|id| !target_ids.contains(id) && seen.insert(*id))
        .map(str::to_string)
        .collect();

    RunComparison {
        target: target.into(),
        comparison: comparison.into(),
        rows,
        matched_count,
        target_total,
        comparison_total,
        removed,
    }
}

/// Loads two persisted runs and compares them.
pub fn compare_run_files(target_path: &Path, comparison_path: &Path) -> Result<RunComparison> {
    let target = TestRun::load(target_path)?;
    let comparison = TestRun::load(comparison_path)?;
    Ok(compare_runs(&target, &comparison))
}
