//! # Sub-case Report Module / 子用例报告模块
//!
//! A test program may break its outcome down into scans/checks by printing a
//! JSON report on standard output. This module decodes that report.
//!
//! 测试程序可以通过在标准输出上打印 JSON 报告，将其结果细分为多个扫描/检查。
//! 此模块负责解码该报告。
//!
//! ```json
//! {
//!   "starttime": "2024-01-01T10:00:00Z",
//!   "endtime": "2024-01-01T10:00:03Z",
//!   "overall_passed": true,
//!   "combined_scan_results": [
//!     { "id": "scan1", "scan_starttime": "...", "scan_endtime": "...",
//!       "test": "port-scan", "test_passed": true, "data": "..." }
//!   ]
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::models::TestCaseResult;

/// The program's output did not decode as a sub-case report.
#[derive(Debug, Error)]
pub enum ReportParseError {
    #[error("output is not a valid sub-case report: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON, but not an object (e.g. an array or a bare value).
    #[error("output is not a valid sub-case report: expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One entry of `combined_scan_results`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScanResult {
    pub id: String,
    #[serde(rename = "scan_starttime")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(rename = "scan_endtime")]
    pub end_time: Option<DateTime<Utc>>,
    /// Label of the check, shown as the sub-case command line.
    /// 检查项的标签，作为子用例的命令行显示。
    pub test: String,
    #[serde(rename = "test_passed")]
    pub passed: bool,
    pub data: String,
}

/// The full report a compliant test program prints on standard output.
///
/// 合规的测试程序在标准输出上打印的完整报告。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubCaseReport {
    #[serde(rename = "starttime")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(rename = "endtime")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(rename = "overall_passed")]
    pub passed: bool,
    #[serde(rename = "combined_scan_results")]
    pub combined_data: Vec<ScanResult>,
}

impl SubCaseReport {
    /// Decodes the captured standard output of a test program.
    /// Only a JSON object is accepted; serde would otherwise read an
    /// array positionally into the struct fields.
    pub fn parse(output: &str) -> Result<Self, ReportParseError> {
        let value: Value = serde_json::from_str(output)?;
        if !value.is_object() {
            return Err(ReportParseError::NotAnObject {
                found: json_kind(&value),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Converts every scan entry into a not-yet-nested sub-case result.
    /// Entries without their own timestamps inherit the parent's window.
    ///
    /// 将每个扫描条目转换为尚未嵌套的子用例结果。
    /// 没有自身时间戳的条目继承父用例的时间窗口。
    pub fn into_sub_case_results(self, parent: &TestCaseResult) -> Vec<TestCaseResult> {
        self.combined_data
            .into_iter()
            .map(|scan| TestCaseResult {
                id: scan.id,
                start_time: scan.start_time.unwrap_or(parent.start_time),
                end_time: scan.end_time.unwrap_or(parent.end_time),
                cmd_line: scan.test,
                passed: scan.passed,
                timed_out: false,
                data: scan.data,
                parent_id: String::new(),
            })
            .collect()
    }
}
