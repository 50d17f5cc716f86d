//! # Configuration Module / 配置模块
//!
//! This module defines the declared test cases and test suites, and loads them
//! from the JSON test configuration file.
//!
//! 此模块定义声明的测试用例和测试套件，并从 JSON 测试配置文件中加载它们。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading the test configuration.
/// Any of these is fatal to the whole run.
///
/// 读取测试配置时引发的错误。任何一个都会导致整个运行失败。
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("unable to read test configuration '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse test configuration '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A single declared test program invocation.
/// Loaded once and never mutated during a run.
///
/// 单个声明的测试程序调用。加载一次，运行期间不会被修改。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TestCase {
    /// Disabled cases are never selected.
    /// 被禁用的用例永远不会被选中。
    #[serde(default)]
    pub disabled: bool,
    #[serde(rename = "testcase_name", default)]
    pub name: String,
    /// The identifier used to correlate results across runs.
    /// 用于在不同运行之间关联结果的标识符。
    #[serde(rename = "testcase_id", default)]
    pub id: String,
    #[serde(rename = "testcase_description", default)]
    pub description: String,
    #[serde(rename = "testcase_kind", default)]
    pub kind: String,
    /// Suite association string, matched against the suite selector.
    /// 套件关联字符串，用于与套件选择器匹配。
    #[serde(rename = "associated_testsuites", default)]
    pub associated_suites: String,
    /// Path to the test program, relative to the suite root when a root is configured.
    /// 测试程序的路径，配置了根目录时相对于套件根目录。
    #[serde(default)]
    pub program: String,
    #[serde(rename = "steps_prerun", default)]
    pub steps_prerun: String,
    #[serde(rename = "steps_postrun", default)]
    pub steps_postrun: String,
    /// Raw argument string, tokenized with shell quoting rules before launch.
    /// 原始参数字符串，启动前按 shell 引号规则进行分词。
    #[serde(default)]
    pub cli_parameters: String,
    /// Wall-clock budget for the main program. Zero or negative fires immediately.
    /// 主程序的挂钟时间预算。零或负数会立即触发超时。
    #[serde(default)]
    pub timeout_secs: i64,
}

impl TestCase {
    /// Returns the command line shown in reports: program followed by the raw parameters.
    pub fn display_command_line(&self, program: &str) -> String {
        format!("{} {}", program, self.cli_parameters)
    }
}

/// A named grouping of cases. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TestSuite {
    #[serde(rename = "testsuite_name", default)]
    pub name: String,
    #[serde(rename = "testsuite_id", default)]
    pub id: String,
    #[serde(rename = "testsuite_alias", default)]
    pub alias: String,
    #[serde(rename = "testsuite_description", default)]
    pub description: String,
}

/// Represents the entire test configuration, loaded from a JSON file.
///
/// 代表从 JSON 文件加载的整个测试配置。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TestConfig {
    /// Root directory for resolving program paths. Relative roots are
    /// resolved against the configuration file's directory.
    /// 用于解析程序路径的根目录。相对路径相对于配置文件所在目录解析。
    #[serde(rename = "testsuite_root", default)]
    pub root: String,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "modified_timestamp", default)]
    pub timestamp: String,
    #[serde(rename = "testcases", default)]
    pub test_cases: Vec<TestCase>,
    #[serde(rename = "testsuites", default)]
    pub test_suites: Vec<TestSuite>,
}

impl TestConfig {
    /// Reads and parses a test configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves the suite root against the directory holding the configuration file.
    ///
    /// 根据配置文件所在目录解析套件根目录。
    pub fn resolve_root(&self, config_path: &Path) -> PathBuf {
        let root = Path::new(&self.root);
        if root.is_absolute() {
            return root.to_path_buf();
        }
        let parent = config_path.parent().unwrap_or_else(|| Path::new("."));
        if self.root.is_empty() {
            parent.to_path_buf()
        } else {
            parent.join(root)
        }
    }

    /// Finds a declared suite by its id or alias.
    pub fn find_suite(&self, identifier: &str) -> Option<&TestSuite> {
        self.test_suites
            .iter()
            .find(|s| s.id == identifier || (!s.alias.is_empty() && s.alias == identifier))
    }
}
