//! # Compare Command Module / 比较命令模块
//!
//! This module implements the `compare` command, which loads two persisted
//! runs and prints a side-by-side timing and status comparison.
//!
//! 此模块实现 `compare` 命令，加载两个已保存的运行并打印状态和耗时的并排比较。

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::core::compare::compare_run_files;
use crate::reporting::console::print_comparison;

/// Executes the compare command.
///
/// # Arguments
/// * `target` - Path to the target (newer) run file
/// * `comparison` - Path to the comparison (baseline) run file
/// * `locale` - Language for console output
pub fn execute(target: &Path, comparison: &Path, locale: &str) -> Result<()> {
    info!(
        target_run = %target.display(),
        comparison_run = %comparison.display(),
        "comparing test runs"
    );
    let report = compare_run_files(target, comparison).with_context(|| {
        format!(
            "Unable to compare {} against {}",
            target.display(),
            comparison.display()
        )
    })?;
    print_comparison(&report, locale);
    Ok(())
}
