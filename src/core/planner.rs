//! # Test Execution Planner Module / 测试执行计划模块
//!
//! This module selects which declared test cases belong to a run, based on
//! a suite selector matched against each case's suite association string.
//!
//! 此模块根据套件选择器与每个用例的套件关联字符串的匹配结果，
//! 选择属于某次运行的已声明测试用例。

use regex::Regex;
use thiserror::Error;

use crate::core::config::{TestCase, TestConfig};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid test suite selector '{selector}': {source}")]
    InvalidSelector {
        selector: String,
        #[source]
        source: regex::Error,
    },
}

/// Represents the cases selected for one run.
/// 表示为一次运行选定的用例。
#[derive(Debug)]
pub struct ExecutionPlan {
    /// Selected, enabled cases in declaration order.
    /// 按声明顺序排列的已选中且已启用的用例。
    pub cases_to_run: Vec<TestCase>,
    /// Cases that matched the selector but are disabled.
    /// 与选择器匹配但被禁用的用例数量。
    pub disabled_count: usize,
}

/// Creates an execution plan for the given selector.
///
/// The selector is a regular expression searched for in each case's
/// `associated_testsuites` string. Declaration order is preserved.
///
/// 为给定的选择器创建执行计划。
/// 选择器是一个正则表达式，在每个用例的 `associated_testsuites` 字符串中搜索。
/// 保留声明顺序。
pub fn plan_execution(config: &TestConfig, selector: &str) -> Result<ExecutionPlan, PlanError> {
    let pattern = Regex::new(selector).map_err(|source| PlanError::InvalidSelector {
        selector: selector.to_string(),
        source,
    })?;

    let (disabled, cases_to_run): (Vec<_>, Vec<_>) = config
        .test_cases
        .iter()
        .filter(|case| pattern.is_match(&case.associated_suites))
        .cloned()
        .partition(|case| case.disabled);

    Ok(ExecutionPlan {
        cases_to_run,
        disabled_count: disabled.len(),
    })
}
