//! # Reporting Module / 报告模块
//!
//! This module handles everything the user sees: inline case lines during a
//! run, the run summary, the comparison table and the optional HTML report.
//!
//! 此模块处理用户看到的所有内容：运行期间的用例行、运行摘要、
//! 比较表格以及可选的 HTML 报告。

pub mod console;
pub mod html;

// Re-export common reporting functions
pub use console::{print_comparison, print_summary};
pub use html::generate_html_report;
