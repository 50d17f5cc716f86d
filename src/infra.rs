//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Suite Runner:
//! launching external commands and file system operations.
//!
//! 此模块为 Suite Runner 提供基础设施服务：
//! 启动外部命令和文件系统操作。

pub mod command;
pub mod fs;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
