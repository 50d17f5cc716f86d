//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints run progress, summaries and comparison tables to the
//! console, with color coding and internationalization support.
//!
//! 此模块将运行进度、摘要和比较表格打印到控制台，支持颜色编码和国际化。

use colored::*;

use crate::core::analysis::TestRunAnalysis;
use crate::core::compare::RunComparison;
use crate::core::config::TestCase;
use crate::core::models::{CaseError, CaseStatus, TestCaseResult, TestRun, format_duration};
use crate::infra::t;

/// Returns the localized, color-coded label for a status.
/// 返回状态的本地化彩色标签。
pub fn status_label(status: CaseStatus) -> ColoredString {
    match status {
        CaseStatus::Passed => t!("status.passed").green(),
        CaseStatus::Failed => t!("status.failed").red(),
        CaseStatus::TimedOut => t!("status.timed_out").red(),
    }
}

fn status_marker(status: CaseStatus) -> ColoredString {
    match status {
        CaseStatus::Passed => status.marker().green(),
        CaseStatus::Failed => status.marker().red(),
        CaseStatus::TimedOut => status.marker().yellow(),
    }
}

pub fn print_run_banner(count: usize, selector: &str) {
    println!(
        "{}",
        t!("run.banner", count = count, suite = selector).bold()
    );
}

pub fn print_case_start(index: usize, case: &TestCase) {
    println!(
        "{}",
        t!(
            "run.executing_case",
            index = format!("{:04}", index),
            id = &case.id,
            name = &case.name
        )
        .blue()
    );
}

/// Prints the inline outcome line of a top-level case.
///
/// 打印顶层用例的单行结果。
pub fn print_case_outcome(index: usize, result: &TestCaseResult, error: Option<&CaseError>) {
    let index = format!("{:04}", index);
    let duration = format_duration(result.duration());
    let line = match error {
        None => t!(
            "run.case_finished",
            index = index,
            id = &result.id,
            status = status_label(result.status()),
            duration = duration,
            cmd = &result.cmd_line
        ),
        Some(CaseError::TimedOut { .. }) => t!(
            "run.case_timed_out",
            index = index,
            id = &result.id,
            status = status_label(CaseStatus::TimedOut),
            duration = duration,
            cmd = &result.cmd_line
        ),
        Some(e) => t!(
            "run.case_error",
            index = index,
            id = &result.id,
            status = t!("status.failed_to_run").red(),
            duration = duration,
            cmd = &result.cmd_line,
            error = e
        ),
    };
    println!("{}", line);
}

pub fn print_sub_case_outcome(index: usize, sub_index: usize, result: &TestCaseResult) {
    println!(
        "{}",
        t!(
            "run.sub_case_finished",
            index = format!("{:04}-{:04}", index, sub_index),
            id = &result.id,
            status = status_label(result.status()),
            duration = format_duration(result.duration()),
            cmd = &result.cmd_line
        )
    );
}

/// Prints the aggregate summary of a finished run.
///
/// 打印已完成运行的汇总摘要。
///
/// # Output Format / 输出格式
/// ```text
/// --- Test Run Summary ---
/// Run: Run-complete-2024-01-01T10:00:00Z-2024-01-01T10:00:07Z
/// Total ran: 2 / Total Passed: 1 / Total Failed: 0 / Total Timed-out: 1
/// Sub-cases reported: 3
/// Total execution time for this test run = 6.012s
/// ```
pub fn print_summary(run: &TestRun, analysis: &TestRunAnalysis, locale: &str) {
    println!("\n{}", t!("summary.banner", locale = locale).bold());
    println!("{}", t!("summary.run_id", locale = locale, id = &run.run_id));

    let totals = t!(
        "summary.totals",
        locale = locale,
        ran = analysis.num_tc_executed,
        passed = analysis.num_passed,
        failed = analysis.num_failed,
        timed_out = analysis.num_timed_out
    );
    if analysis.all_passed() {
        println!("{}", totals.green());
    } else {
        println!("{}", totals.red());
    }

    if analysis.num_sub_tc_executed > 0 {
        println!(
            "{}",
            t!(
                "summary.sub_cases",
                locale = locale,
                count = analysis.num_sub_tc_executed
            )
        );
    }
    println!(
        "{}",
        t!(
            "summary.duration",
            locale = locale,
            duration = format_duration(analysis.total_duration)
        )
    );
}

/// Prints a side-by-side comparison of two runs.
///
/// 并排打印两次运行的比较结果。
///
/// # Output Format / 输出格式
/// ```text
///      TARGET RUN        P/F/T           TIME          COMP RUN        P/F/T           TIME     TIME DELTA
///               A        +++++         1.002s                 A        +++++         1.104s        -0.102s
///               C        -----         0.010s               N/A          N/A            N/A            N/A
/// ```
pub fn print_comparison(comparison: &RunComparison, locale: &str) {
    println!(
        "{}",
        t!(
            "compare.target_run",
            locale = locale,
            id = &comparison.target.run_id,
            count = comparison.target.results_executed,
            duration = format_duration(comparison.target.duration)
        )
    );
    println!(
        "{}",
        t!(
            "compare.comp_run",
            locale = locale,
            id = &comparison.comparison.run_id,
            count = comparison.comparison.results_executed,
            duration = format_duration(comparison.comparison.duration)
        )
    );
    println!();

    println!(
        "{}",
        format!(
            "{:>15}   {:>10}   {:>12}   {:>15}   {:>10}   {:>12}   {:>12}",
            t!("compare.header.target", locale = locale),
            "P/F/T",
            t!("compare.header.time", locale = locale),
            t!("compare.header.comp", locale = locale),
            "P/F/T",
            t!("compare.header.time", locale = locale),
            t!("compare.header.delta", locale = locale)
        )
        .bold()
    );

    let na = t!("compare.not_available", locale = locale);
    for row in &comparison.rows {
        let (comp_id, comp_status, comp_time, delta) = match (&row.comparison, row.delta()) {
            (Some(comp), Some(delta)) => (
                comp.id.clone(),
                status_marker(comp.status),
                format_duration(comp.duration),
                format_delta(delta),
            ),
            _ => (
                na.to_string(),
                na.normal(),
                na.to_string(),
                na.to_string().normal(),
            ),
        };
        println!(
            "{:>15}   {:>10}   {:>12}   {:>15}   {:>10}   {:>12}   {:>12}",
            row.target.id,
            status_marker(row.target.status),
            format_duration(row.target.duration),
            comp_id,
            comp_status,
            comp_time,
            delta
        );
    }

    if !comparison.removed.is_empty() {
        println!("\n{}", t!("compare.removed_banner", locale = locale).yellow());
        for id in &comparison.removed {
            println!("  - {}", id);
        }
    }

    let percent = comparison
        .percent_change()
        .map(|p| format!("{:6.2}%", p))
        .unwrap_or_else(|| na.to_string());
    println!();
    println!(
        "{}",
        t!(
            "compare.totals",
            locale = locale,
            count = comparison.matched_count,
            target = format_duration(comparison.target_total),
            comp = format_duration(comparison.comparison_total),
            delta = format_duration(comparison.delta()),
            percent = percent
        )
        .bold()
    );
}

/// Colors a signed delta: slower is red, faster is green.
fn format_delta(delta: chrono::TimeDelta) -> ColoredString {
    let text = format_duration(delta);
    if delta > chrono::TimeDelta::zero() {
        text.red()
    } else if delta < chrono::TimeDelta::zero() {
        text.green()
    } else {
        text.normal()
    }
}

