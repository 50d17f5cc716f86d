//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Suite Runner:
//! configuration, the result model, case execution, run orchestration,
//! analysis and run-to-run comparison.
//!
//! 此模块包含 Suite Runner 的核心功能：
//! 配置、结果模型、用例执行、运行编排、分析以及运行间比较。

pub mod analysis;
pub mod compare;
pub mod config;
pub mod driver;
pub mod execution;
pub mod models;
pub mod planner;
pub mod report;

// Re-exports
pub use analysis::{TestRunAnalysis, analyze};
pub use compare::{RunComparison, compare_runs};
pub use config::{TestCase, TestConfig};
pub use driver::{RunRegistry, TestDriver};
pub use execution::execute_test_case;
pub use models::{TestCaseResult, TestRun};
