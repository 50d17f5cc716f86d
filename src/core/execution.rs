//! # Test Execution Engine Module / 测试执行引擎模块
//!
//! This module executes a single declared test case: optional pre-run hook,
//! the main program raced against the case timeout, decoding of the
//! program's sub-case report, and optional post-run hook.
//!
//! 此模块执行单个已声明的测试用例：可选的预运行钩子、
//! 与用例超时竞争的主程序、程序子用例报告的解码，以及可选的后运行钩子。

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::core::config::TestCase;
use crate::core::models::{CaseError, TestCaseResult};
use crate::core::report::SubCaseReport;
use crate::infra::command::{self, LaunchError};

/// Everything produced by executing one case.
///
/// 执行一个用例所产生的全部内容。
#[derive(Debug)]
pub struct CaseExecution {
    /// The top-level result for the case.
    /// 该用例的顶层结果。
    pub result: TestCaseResult,
    /// Sub-case results decoded from the program's report, not yet nested.
    /// 从程序报告中解码的子用例结果，尚未嵌套。
    pub sub_cases: Vec<TestCaseResult>,
    /// The case-local error, if any. The last failing step wins.
    /// 用例本地错误（如有）。以最后一个失败的步骤为准。
    pub error: Option<CaseError>,
}

/// Executes one test case to completion or timeout.
///
/// # Arguments
/// * `case` - The declared test case
/// * `program` - The program path to invoke, already resolved against the suite root
/// * `working_dir` - Working directory for the hooks and the main program
///
/// # Returns
/// A `CaseExecution`. Errors are local to the case and never abort the run.
///
/// 执行一个测试用例，直至完成或超时。
/// 错误仅限于该用例，永远不会中止整个运行。
pub async fn execute_test_case(
    case: &TestCase,
    program: &str,
    working_dir: Option<&Path>,
) -> CaseExecution {
    if let Err(source) = run_hook(&case.steps_prerun, working_dir, "pre-run").await {
        return CaseExecution {
            result: TestCaseResult::new(&case.id),
            sub_cases: Vec::new(),
            error: Some(CaseError::PrerunFailed {
                id: case.id.clone(),
                command: case.steps_prerun.clone(),
                source,
            }),
        };
    }

    let mut execution = run_main_command(case, program, working_dir).await;

    if let Err(source) = run_hook(&case.steps_postrun, working_dir, "post-run").await {
        if let Some(previous) = execution.error.take() {
            warn!(case = %case.id, error = %previous, "superseded by post-run failure");
        }
        execution.error = Some(CaseError::PostrunFailed {
            id: case.id.clone(),
            command: case.steps_postrun.clone(),
            source,
        });
    }

    execution
}

/// Runs a hook command, if one is declared. Blank hooks are treated as absent.
async fn run_hook(
    hook: &str,
    working_dir: Option<&Path>,
    stage: &str,
) -> Result<(), LaunchError> {
    if hook.trim().is_empty() {
        return Ok(());
    }
    let (program, args) = command::split_program_and_args(hook)?;
    command::launch_command(working_dir, &program, &args).await?;
    info!("Successfully executed {} command '{}'", stage, hook);
    Ok(())
}

/// Races the main program against the case timeout and decodes its report.
///
/// The launch runs on its own task so the timer starts independently of it.
/// On timeout the task is aborted; the child was spawned with `kill_on_drop`,
/// so the abandoned process is killed rather than leaked.
///
/// 将主程序与用例超时进行竞争，并解码其报告。
/// 启动在独立任务上运行，因此计时器独立开始计时。
/// 超时时任务会被中止；子进程以 `kill_on_drop` 方式派生，因此被放弃的进程会被终止而不会泄漏。
async fn run_main_command(
    case: &TestCase,
    program: &str,
    working_dir: Option<&Path>,
) -> CaseExecution {
    let mut result = TestCaseResult::new(&case.id);
    result.cmd_line = case.display_command_line(program);

    let args = match command::split_command_line(&case.cli_parameters) {
        Ok(args) => args,
        Err(e) => {
            result.start_test();
            result.end_test();
            return CaseExecution {
                result,
                sub_cases: Vec::new(),
                error: Some(CaseError::Launch(e)),
            };
        }
    };

    info!("Executing command [{} {}] ...", program, args.join(" "));

    let timeout = Duration::from_secs(case.timeout_secs.max(0).unsigned_abs());
    let dir: Option<PathBuf> = working_dir.map(Path::to_path_buf);
    let program_owned = program.to_string();

    result.start_test();
    let mut handle = tokio::spawn(async move {
        command::launch_command(dir.as_deref(), &program_owned, &args).await
    });

    let mut sub_cases = Vec::new();
    let error = tokio::select! {
        biased;
        _ = tokio::time::sleep(timeout) => {
            result.end_test();
            result.mark_timed_out();
            handle.abort();
            Some(CaseError::TimedOut {
                id: case.id.clone(),
                timeout_secs: case.timeout_secs,
            })
        }
        joined = &mut handle => {
            result.end_test();
            let launched = joined.unwrap_or_else(|e| {
                Err(LaunchError::Wait {
                    program: program.to_string(),
                    source: std::io::Error::other(e.to_string()),
                })
            });
            match launched {
                Ok(stdout) => match SubCaseReport::parse(&stdout) {
                    Ok(report) => {
                        result.passed = report.passed;
                        sub_cases = report.into_sub_case_results(&result);
                        None
                    }
                    Err(source) => Some(CaseError::ResultParse {
                        id: case.id.clone(),
                        source,
                    }),
                },
                Err(e) => Some(CaseError::Launch(e)),
            }
        }
    };

    CaseExecution {
        result,
        sub_cases,
        error,
    }
}
