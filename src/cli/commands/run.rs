//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command, which executes the test cases
//! of a selected suite, persists the run and prints its summary.
//!
//! 此模块实现 `run` 命令，执行选定套件的测试用例，保存运行结果并打印摘要。

use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::{
    core::driver::TestDriver,
    infra::t,
    reporting::{console::print_summary, html::generate_html_report},
};

/// Options of the `run` command, as parsed from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: PathBuf,
    pub suite: String,
    pub output_name: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub html: Option<PathBuf>,
    pub locale: String,
}

/// Executes the run command with the provided options.
///
/// # Returns
/// An error when the configuration cannot be loaded, the selector is invalid,
/// the run cannot be persisted, or any top-level case failed or timed out.
/// The run is always persisted before a failing outcome is reported.
///
/// 当配置无法加载、选择器无效、运行无法保存，或任何顶层用例失败或超时时返回错误。
/// 在报告失败结果之前，运行总是会被保存。
pub async fn execute(options: RunOptions) -> Result<()> {
    let locale = options.locale.as_str();

    let driver = TestDriver::load(&options.config)
        .with_context(|| format!("Unable to load test configuration {}", options.config.display()))?;

    println!(
        "{}",
        t!("config_loaded", locale = locale, path = driver.config_path().display())
    );
    println!(
        "{}",
        t!("suite_root", locale = locale, path = driver.suite_root().display()).cyan()
    );
    if let Some(suite) = driver.config().find_suite(&options.suite) {
        println!(
            "{}",
            t!(
                "suite_selected",
                locale = locale,
                name = &suite.name,
                description = &suite.description
            )
        );
    }

    let stop_token = setup_signal_handler(locale);

    let run = driver
        .execute_test_suite(&options.suite, &stop_token)
        .await?;

    let saved_to = run.save(options.output_dir.as_deref(), options.output_name.as_deref())?;
    println!(
        "{}",
        t!("run_saved", locale = locale, path = saved_to.display())
    );

    let analysis = run.analyze();
    print_summary(&run, &analysis, locale);

    if let Some(report_path) = &options.html {
        println!(
            "\n{}",
            t!("html_report_generating", locale = locale, path = report_path.display())
        );
        if let Err(e) = generate_html_report(&run, &analysis, report_path, locale) {
            eprintln!("{} {:#}", t!("html_report_failed", locale = locale).red(), e);
        }
    }

    if analysis.all_passed() {
        println!("\n{}", t!("all_tests_passed", locale = locale).green().bold());
        Ok(())
    } else {
        anyhow::bail!(t!(
            "run_failed",
            locale = locale,
            failed = analysis.num_failed,
            timed_out = analysis.num_timed_out
        )
        .to_string());
    }
}

/// Sets up a signal handler for graceful shutdown.
/// The case currently executing finishes; no further case is started.
fn setup_signal_handler(locale: &str) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                println!("\n{}", t!("shutdown_signal", locale = &locale).yellow());
                token_clone.cancel();
            }
            Err(e) => error!(error = %e, "failed to listen for Ctrl-C"),
        }
    });

    token
}
