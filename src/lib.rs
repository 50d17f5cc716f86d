//! # Suite Runner Library / Suite Runner 库
//!
//! This library provides the core functionality for the Suite Runner tool,
//! a configuration-driven harness that executes external test programs,
//! records their (optionally nested) results, and compares runs.
//!
//! 此库为 Suite Runner 工具提供核心功能，
//! 这是一个配置驱动的测试框架，用于执行外部测试程序、
//! 记录其（可嵌套的）结果并比较多次运行。
//!
//! ## Modules / 模块
//!
//! - `core` - Result model, case execution, run orchestration, analysis and comparison
//! - `infra` - Infrastructure services like command execution and file system operations
//! - `reporting` - Console and HTML reporting
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 结果模型、用例执行、运行编排、分析和比较
//! - `infra` - 基础设施服务，如命令执行和文件系统操作
//! - `reporting` - 控制台和 HTML 报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::analysis;
pub use crate::core::compare;
pub use crate::core::config;
pub use crate::core::driver;
pub use crate::core::execution;
pub use crate::core::models;

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for the application's user interface. It attempts to match the full
/// locale (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
pub fn init() -> String {
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    let lang = resolve_locale(&locale);
    rust_i18n::set_locale(&lang);
    lang
}

/// Maps a requested locale onto one of the bundled locales.
///
/// 将请求的语言环境映射到内置的语言环境之一。
pub fn resolve_locale(requested: &str) -> String {
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&requested) {
        return requested.to_string();
    }
    requested
        .split(['-', '_'])
        .next()
        .filter(|lang_code| !lang_code.is_empty())
        .and_then(|lang_code| available_locales.iter().find(|l| l.starts_with(lang_code)))
        .map(|l| l.to_string())
        .unwrap_or_else(|| "en".to_string())
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
