//! # Test Driver Module / 测试驱动模块
//!
//! The driver owns a loaded configuration and runs selected suites against it.
//! Cases run strictly one at a time, in declaration order; each case's
//! sub-case results are appended right after it.
//!
//! 驱动程序持有已加载的配置，并针对其运行选定的套件。
//! 用例严格按声明顺序逐个运行；每个用例的子用例结果紧跟其后追加。

use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::core::config::{ConfigLoadError, TestCase, TestConfig};
use crate::core::execution::{CaseExecution, execute_test_case};
use crate::core::models::{CaseError, CaseStatus, TestCaseResult, TestRun, format_duration};
use crate::core::planner::{self, PlanError};
use crate::reporting::console;

/// The runs created by a driver. Holds finalized runs only: a run is
/// registered after its last case and its run id are in place, so a run
/// still in progress is not visible here. Appends are serialized by a single
/// lock that is held only for the push itself.
///
/// 由驱动程序创建的运行记录。仅保存已完成的运行：运行在最后一个用例结束、
/// 运行标识符生成之后才注册，因此进行中的运行不会出现在这里。
/// 追加操作由单个锁串行化，该锁仅在追加期间持有。
#[derive(Debug, Default)]
pub struct RunRegistry {
    runs: Mutex<Vec<Arc<TestRun>>>,
}

impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a finalized run and returns the shared handle to it.
    pub fn register(&self, run: TestRun) -> Arc<TestRun> {
        debug_assert!(run.is_finalized(), "only finalized runs are registered");
        let run = Arc::new(run);
        let mut runs = self.runs.lock().unwrap_or_else(PoisonError::into_inner);
        runs.push(Arc::clone(&run));
        debug!(run_id = %run.run_id, total = runs.len(), "registered test run");
        run
    }

    /// Snapshot of all registered runs, in registration order.
    pub fn runs(&self) -> Vec<Arc<TestRun>> {
        self.runs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.runs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runs test suites selected from a loaded configuration.
///
/// 运行从已加载配置中选出的测试套件。
#[derive(Debug)]
pub struct TestDriver {
    config_path: PathBuf,
    suite_root: PathBuf,
    config: TestConfig,
    registry: Arc<RunRegistry>,
}

impl TestDriver {
    /// Loads the configuration at `path` and resolves the suite root.
    ///
    /// 加载 `path` 处的配置并解析套件根目录。
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let config = TestConfig::load(path)?;
        let config_path = std::fs::canonicalize(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(config, config_path))
    }

    /// Builds a driver from an already parsed configuration.
    pub fn new(config: TestConfig, config_path: PathBuf) -> Self {
        let suite_root = config.resolve_root(&config_path);
        Self {
            config_path,
            suite_root,
            config,
            registry: Arc::new(RunRegistry::new()),
        }
    }

    /// Shares an existing registry with this driver.
    pub fn with_registry(mut self, registry: Arc<RunRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn suite_root(&self) -> &Path {
        &self.suite_root
    }

    pub fn registry(&self) -> &Arc<RunRegistry> {
        &self.registry
    }

    /// The program path to invoke for `case`: joined onto the suite root
    /// when the configuration declares a root, otherwise as declared.
    pub fn program_path(&self, case: &TestCase) -> String {
        if self.config.root.is_empty() {
            case.program.clone()
        } else {
            self.suite_root.join(&case.program).display().to_string()
        }
    }

    /// Executes every selected, enabled case and returns the registered run.
    ///
    /// Cancelling `stop` prevents further cases from starting; the partial
    /// run is still finalized and registered.
    ///
    /// # Errors
    /// Only an invalid selector is fatal. Per-case failures are recorded
    /// in the run and never abort it.
    ///
    /// 执行每个选中且启用的用例，并返回已注册的运行。
    /// 取消 `stop` 会阻止后续用例启动；部分运行仍会被最终确定并注册。
    pub async fn execute_test_suite(
        &self,
        selector: &str,
        stop: &CancellationToken,
    ) -> Result<Arc<TestRun>, PlanError> {
        let plan = planner::plan_execution(&self.config, selector)?;
        if plan.disabled_count > 0 {
            info!(
                disabled = plan.disabled_count,
                "skipping disabled test cases matching \"{}\"", selector
            );
        }

        let mut run = TestRun::new(self.config_path.display().to_string(), plan.cases_to_run);
        console::print_run_banner(run.test_cases.len(), selector);

        run.start_time = Utc::now();

        for (i, case) in run.test_cases.iter().enumerate() {
            if stop.is_cancelled() {
                warn!(
                    remaining = run.test_cases.len() - i,
                    "run cancelled, skipping remaining test cases"
                );
                break;
            }

            let index = i + 1;
            console::print_case_start(index, case);

            let program = self.program_path(case);
            let CaseExecution {
                mut result,
                sub_cases,
                error,
            } = execute_test_case(case, &program, Some(&self.suite_root)).await;

            result.data = outcome_line(index, &result, error.as_ref());
            console::print_case_outcome(index, &result, error.as_ref());

            let parent_id = result.id.clone();
            run.executed_test_results.push(result);

            for (j, mut sub_case) in sub_cases.into_iter().enumerate() {
                sub_case.nest_under(&parent_id);
                console::print_sub_case_outcome(index, j + 1, &sub_case);
                run.executed_test_results.push(sub_case);
            }
        }

        run.finalize(selector);
        info!(run_id = %run.run_id, duration = %format_duration(run.duration()), "test run finished");

        Ok(self.registry.register(run))
    }
}

/// The plain-text outcome line recorded as a top-level result's data.
///
/// 作为顶层结果数据记录的纯文本结果行。
pub fn outcome_line(index: usize, result: &TestCaseResult, error: Option<&CaseError>) -> String {
    let duration = format_duration(result.duration());
    match error {
        None => format!(
            "[{:04}] {} {} (time of {} for {})",
            index,
            result.id,
            result.status(),
            duration,
            result.cmd_line
        ),
        Some(CaseError::TimedOut { .. }) => format!(
            "[{:04}] {} {} (terminated after {} for {})",
            index,
            result.id,
            CaseStatus::TimedOut,
            duration,
            result.cmd_line
        ),
        Some(e) => format!(
            "[{:04}] {} FAILED TO RUN (time of {} for {}, error = '{}')",
            index, result.id, duration, result.cmd_line, e
        ),
    }
}
