//! # CLI Commands / 命令行命令
//!
//! - `run` - Execute a test suite and persist the run
//! - `compare` - Compare two persisted runs
//!
//! - `run` - 执行测试套件并保存运行结果
//! - `compare` - 比较两个已保存的运行

pub mod compare;
pub mod run;
