//! # Run Analysis Module / 运行分析模块
//!
//! Reduces a completed run into aggregate counts. Pure; the run is never mutated.
//!
//! 将已完成的运行归约为汇总计数。纯函数，不会修改运行。

use chrono::TimeDelta;

use crate::core::models::{CaseStatus, Outcome, TestRun};

/// Aggregate counts over one run.
///
/// 单次运行的汇总计数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestRunAnalysis {
    pub num_tc_executed: usize,
    pub num_sub_tc_executed: usize,
    pub num_passed: usize,
    pub num_failed: usize,
    pub num_timed_out: usize,
    /// Sum of top-level case durations only.
    /// 仅为顶层用例持续时间之和。
    pub total_duration: TimeDelta,
}

impl Default for TestRunAnalysis {
    fn default() -> Self {
        Self {
            num_tc_executed: 0,
            num_sub_tc_executed: 0,
            num_passed: 0,
            num_failed: 0,
            num_timed_out: 0,
            total_duration: TimeDelta::zero(),
        }
    }
}

impl TestRunAnalysis {
    /// Whether every top-level case passed.
    pub fn all_passed(&self) -> bool {
        self.num_failed == 0 && self.num_timed_out == 0
    }
}

/// Analyzes a run. Sub-cases are counted but never classified or timed.
///
/// 分析一次运行。子用例只计数，不分类也不计时。
pub fn analyze(run: &TestRun) -> TestRunAnalysis {
    run.outcomes()
        .fold(TestRunAnalysis::default(), |mut analysis, outcome| {
            match outcome {
                Outcome::SubCase { .. } => analysis.num_sub_tc_executed += 1,
                Outcome::TopLevel(result) => {
                    analysis.num_tc_executed += 1;
                    match result.status() {
                        CaseStatus::TimedOut => analysis.num_timed_out += 1,
                        CaseStatus::Passed => analysis.num_passed += 1,
                        CaseStatus::Failed => analysis.num_failed += 1,
                    }
                    analysis.total_duration = analysis.total_duration + result.duration();
                }
            }
            analysis
        })
}

impl TestRun {
    pub fn analyze(&self) -> TestRunAnalysis {
        analyze(self)
    }
}
