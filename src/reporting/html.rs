//! # HTML Reporting Module / HTML 报告模块
//!
//! This module renders a finished run as a standalone HTML file with summary
//! counters and a results table in which sub-cases are nested under their
//! parent case.
//!
//! 此模块将已完成的运行渲染为独立的 HTML 文件，包含汇总计数和结果表格，
//! 其中子用例嵌套在其父用例之下。

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::analysis::TestRunAnalysis;
use crate::core::models::{CaseStatus, Outcome, TestRun, format_duration};
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

/// Embedded JavaScript for HTML report interactivity / HTML 报告交互性的嵌入式 JavaScript
const HTML_SCRIPT: &str = include_str!("assets/report.js");

fn status_class(status: CaseStatus) -> &'static str {
    match status {
        CaseStatus::Passed => "status-Passed",
        CaseStatus::Failed => "status-Failed",
        CaseStatus::TimedOut => "status-Timeout",
    }
}

fn status_text(status: CaseStatus, locale: &str) -> String {
    match status {
        CaseStatus::Passed => t!("status.passed", locale = locale).to_string(),
        CaseStatus::Failed => t!("status.failed", locale = locale).to_string(),
        CaseStatus::TimedOut => t!("status.timed_out", locale = locale).to_string(),
    }
}

/// Generates an HTML report for a run.
///
/// # Arguments / 参数
/// * `run` - The finished run / 已完成的运行
/// * `analysis` - The run's aggregate counts / 运行的汇总计数
/// * `output_path` - Where the HTML file is written / HTML 文件的写入位置
/// * `locale` - The locale to use for labels / 标签使用的语言环境
///
/// # Errors / 错误
/// Returns an error if the file cannot be written.
/// 如果无法写入文件，则返回错误。
pub fn generate_html_report(
    run: &TestRun,
    analysis: &TestRunAnalysis,
    output_path: &Path,
    locale: &str,
) -> Result<()> {
    let html = render_html_report(run, analysis, locale);
    fs::write(output_path, html)
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))
}

/// Renders the report document without touching the file system.
pub fn render_html_report(run: &TestRun, analysis: &TestRunAnalysis, locale: &str) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<!DOCTYPE html><html><head><meta charset='utf-8'><title>{}</title>",
        t!("html_report.title", locale = locale)
    ));
    html.push_str("<style>");
    html.push_str(HTML_STYLE);
    html.push_str("</style>");
    html.push_str("</head><body>");
    html.push_str(&format!(
        "<h1>{}</h1><p class='run-id'>{}</p>",
        t!("html_report.main_header", locale = locale),
        escape_html(&run.run_id)
    ));

    html.push_str("<div class='summary-container'>");
    for (count, label, class) in [
        (
            analysis.num_tc_executed,
            t!("html_report.summary.total", locale = locale),
            "",
        ),
        (
            analysis.num_passed,
            t!("html_report.summary.passed", locale = locale),
            "passed-text",
        ),
        (
            analysis.num_failed,
            t!("html_report.summary.failed", locale = locale),
            "failed-text",
        ),
        (
            analysis.num_timed_out,
            t!("html_report.summary.timed_out", locale = locale),
            "timeout-text",
        ),
        (
            analysis.num_sub_tc_executed,
            t!("html_report.summary.sub_cases", locale = locale),
            "",
        ),
    ] {
        html.push_str(&format!(
            "<div class='summary-item'><span class='count {}'>{}</span><span class='label'>{}</span></div>",
            class, count, label
        ));
    }
    html.push_str(&format!(
        "<div class='summary-item'><span class='count'>{}</span><span class='label'>{}</span></div>",
        format_duration(analysis.total_duration),
        t!("html_report.summary.duration", locale = locale)
    ));
    html.push_str("</div>");

    html.push_str("<table><thead><tr>");
    html.push_str(&format!(
        "<th>{}</th>",
        t!("html_report.table.header.id", locale = locale)
    ));
    html.push_str(&format!(
        "<th class='status-col'>{}</th>",
        t!("html_report.table.header.status", locale = locale)
    ));
    html.push_str(&format!(
        "<th class='duration-cell'>{}</th>",
        t!("html_report.table.header.duration", locale = locale)
    ));
    html.push_str(&format!(
        "<th>{}</th>",
        t!("html_report.table.header.command", locale = locale)
    ));
    html.push_str("</tr></thead><tbody>");

    for (i, outcome) in run.outcomes().enumerate() {
        let result = outcome.result();
        let status = result.status();
        let row_class = match outcome {
            Outcome::TopLevel(_) => "case-row",
            Outcome::SubCase { .. } => "sub-case-row",
        };

        let output_id = format!("output-{}", i);
        let output_toggle = if result.data.is_empty() {
            String::new()
        } else {
            format!(
                "<div class='output-toggle' onclick=\"toggleOutput('{}')\">{}</div>",
                output_id,
                t!("html_report.toggle_output", locale = locale)
            )
        };

        html.push_str(&format!("<tr class='{}'>", row_class));
        html.push_str(&format!("<td>{}</td>", escape_html(&result.id)));
        html.push_str(&format!(
            "<td class='status-col'><div class='status-cell {}'>{}</div>{}</td>",
            status_class(status),
            status_text(status, locale),
            output_toggle
        ));
        html.push_str(&format!(
            "<td class='duration-cell'>{}</td>",
            format_duration(result.duration())
        ));
        html.push_str(&format!("<td><code>{}</code></td>", escape_html(&result.cmd_line)));
        html.push_str("</tr>");

        if !result.data.is_empty() {
            html.push_str(&format!(
                "<tr id='{}' style='display:none;'><td colspan='4'><pre class='output-content'>{}</pre></td></tr>",
                output_id,
                escape_html(&result.data)
            ));
        }
    }

    html.push_str("</tbody></table>");
    html.push_str("<script>");
    html.push_str(HTML_SCRIPT);
    html.push_str("</script></body></html>");
    html
}

/// Simple HTML escape function to replace special characters with their HTML entities
/// 简单的 HTML 转义函数，用 HTML 实体替换特殊字符
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
