//! # Command Launcher Module / 命令启动模块
//!
//! Starts external programs, captures their output, and tokenizes the
//! command strings declared in the test configuration.
//! No timeout is applied here; callers race the returned future against a timer.
//!
//! 启动外部程序、捕获其输出，并对测试配置中声明的命令字符串进行分词。
//! 此处不施加超时；调用者会将返回的 future 与计时器进行竞争。

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::debug;

/// Failure to run a command to a successful exit.
///
/// 命令未能成功运行至正常退出。
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("unable to tokenize command line '{0}' (unbalanced quotes?)")]
    Tokenize(String),

    #[error("command line is empty")]
    EmptyCommand,

    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed while waiting for '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}{}", stderr_suffix(.stderr))]
    ExitStatus {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Output captured from a finished child process.
#[derive(Debug)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Splits a command string into tokens using POSIX shell quoting rules.
/// Empty tokens produced by repeated whitespace are discarded.
///
/// 使用 POSIX shell 引号规则将命令字符串拆分为标记。
/// 由连续空白产生的空标记会被丢弃。
pub fn split_command_line(line: &str) -> Result<Vec<String>, LaunchError> {
    shlex::split(line).ok_or_else(|| LaunchError::Tokenize(line.to_string()))
}

/// Splits a hook command string into the program and its arguments.
pub fn split_program_and_args(line: &str) -> Result<(String, Vec<String>), LaunchError> {
    let mut tokens = split_command_line(line)?;
    if tokens.is_empty() {
        return Err(LaunchError::EmptyCommand);
    }
    let program = tokens.remove(0);
    Ok((program, tokens))
}

/// Spawns a command and captures stdout and stderr separately.
/// Both streams are drained concurrently so neither pipe can fill up and
/// stall the child.
///
/// 派生一个命令并分别捕获 stdout 和 stderr。
/// 两个流被并发读取，以免任何一个管道被填满而阻塞子进程。
pub async fn spawn_and_capture(
    mut cmd: Command,
    program: &str,
) -> Result<CapturedOutput, LaunchError> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let stdout_handle = tokio::spawn(read_pipe(child.stdout.take()));
    let stderr_handle = tokio::spawn(read_pipe(child.stderr.take()));

    let wait_error = |source: std::io::Error| LaunchError::Wait {
        program: program.to_string(),
        source,
    };

    let status = child.wait().await.map_err(wait_error)?;

    let stdout = stdout_handle
        .await
        .map_err(|e| wait_error(std::io::Error::other(e)))?
        .map_err(wait_error)?;
    let stderr = stderr_handle
        .await
        .map_err(|e| wait_error(std::io::Error::other(e)))?
        .map_err(wait_error)?;

    Ok(CapturedOutput {
        status,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    })
}

/// Reads a child's pipe to the end. A missing pipe yields no bytes;
/// read errors are returned rather than truncating the output.
pub async fn read_pipe<R: AsyncRead + Unpin>(pipe: Option<R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

/// Runs `program` with `args` in `working_dir` and returns its standard output.
/// A non-zero exit is reported as [`LaunchError::ExitStatus`].
///
/// The child is killed if the returned future is dropped before completion.
///
/// 在 `working_dir` 中使用 `args` 运行 `program` 并返回其标准输出。
/// 非零退出会报告为 [`LaunchError::ExitStatus`]。
/// 如果返回的 future 在完成前被丢弃，子进程会被终止。
pub async fn launch_command(
    working_dir: Option<&Path>,
    program: &str,
    args: &[String],
) -> Result<String, LaunchError> {
    let mut cmd = Command::new(program);
    cmd.args(args).kill_on_drop(true);
    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    debug!(program, ?args, dir = ?working_dir, "launching command");
    let output = spawn_and_capture(cmd, program).await?;

    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(LaunchError::ExitStatus {
            program: program.to_string(),
            status: output.status,
            stderr: output.stderr,
        })
    }
}
