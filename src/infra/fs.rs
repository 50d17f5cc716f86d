//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides the file system helpers used for persisting runs
//! and resolving paths.
//!
//! 此模块提供用于持久化运行结果和解析路径的文件系统辅助函数。

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Builds the output path for a persisted document.
///
/// # Arguments
/// * `dir` - Target directory; the current directory when `None` or empty
/// * `filename` - File name; `default_name` when `None` or empty
/// * `default_name` - Fallback file name
pub fn output_path(dir: Option<&Path>, filename: Option<&str>, default_name: &str) -> PathBuf {
    let dir = dir
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let filename = filename.filter(|f| !f.is_empty()).unwrap_or(default_name);
    dir.join(filename)
}

/// Serializes `value` as pretty JSON into `path`, creating parent directories.
///
/// 将 `value` 以格式化 JSON 序列化写入 `path`，并创建父目录。
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to serialize JSON to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}

/// Reads and deserializes a JSON document from `path`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file =
        fs::File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))
}
