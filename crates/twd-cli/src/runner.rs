//! Blocking subprocess execution with a deadline.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Poll interval while waiting on a child process.
const WAIT_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Error)]
pub enum RunnerError {
    /// The program does not exist or cannot be executed at all.
    #[error("`{program}` is not available: {source}")]
    Unavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The deadline elapsed before the child exited; the child was killed.
    #[error("`{program}` did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },
    #[error("failed to run `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Captured result of a finished child process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Convenience constructor for canned output in tests.
    #[must_use]
    pub fn ok(stdout: &str) -> Self {
        Self {
            success: true,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }
}

/// Capability to run an external command under a deadline.
///
/// The production implementation spawns a real child process; tests
/// substitute an implementation returning canned output so no subprocess is
/// ever involved.
pub trait CommandRunner {
    fn run(
        &self,
        program: &Path,
        args: &[&str],
        timeout: Duration,
    ) -> Result<CommandOutput, RunnerError>;
}

/// `CommandRunner` backed by `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &Path,
        args: &[&str],
        timeout: Duration,
    ) -> Result<CommandOutput, RunnerError> {
        let name = program.display().to_string();
        tracing::debug!(program = %name, ?args, "spawning");

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                    RunnerError::Unavailable {
                        program: name.clone(),
                        source,
                    }
                }
                _ => RunnerError::Io {
                    program: name.clone(),
                    source,
                },
            })?;

        wait_with_deadline(child, &name, timeout)
    }
}

/// Poll the child until it exits or the deadline passes. A child that
/// overruns the deadline is killed and reaped before the error is returned.
fn wait_with_deadline(
    mut child: Child,
    program: &str,
    timeout: Duration,
) -> Result<CommandOutput, RunnerError> {
    let started = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                return Ok(CommandOutput {
                    success: status.success(),
                    stdout: read_pipe(child.stdout.take()),
                    stderr: read_pipe(child.stderr.take()),
                });
            }
            Ok(None) => {}
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(RunnerError::Io {
                    program: program.to_string(),
                    source,
                });
            }
        }

        if started.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Err(RunnerError::Timeout {
                program: program.to_string(),
                timeout,
            });
        }
        std::thread::sleep(WAIT_POLL);
    }
}

fn read_pipe<R: Read>(pipe: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}
