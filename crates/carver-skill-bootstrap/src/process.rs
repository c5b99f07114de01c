//! Child-process execution with a deadline.
//!
//! Provisioning steps (venv creation, pip installs) are blocking child
//! processes that can hang on network stalls. This helper polls `try_wait`
//! against a deadline and kills on expiry.
//!
//! IMPORTANT: stdout/stderr are drained on background threads while the
//! process runs. Without this, a child writing more than the pipe buffer
//! (~64KB) would block on write and we would deadlock waiting for it to exit.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

/// Poll interval for the `try_wait` loop.
const CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Captured result of one child process run.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub timed_out: bool,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == 0
    }

    /// Diagnostic text for error messages: stderr if present, else stdout,
    /// else a timeout/exit-code note.
    pub fn diagnostic(&self) -> String {
        if self.timed_out {
            return self.stderr.clone();
        }
        let err = self.stderr.trim();
        if !err.is_empty() {
            return err.to_string();
        }
        let out = self.stdout.trim();
        if !out.is_empty() {
            return out.to_string();
        }
        format!("exit code {}", self.exit_code)
    }
}

/// Run a command to completion, killing it if it outlives `timeout`.
pub fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<CommandOutput> {
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    let program = cmd.get_program().to_string_lossy().to_string();

    let mut child = cmd
        .spawn()
        .with_context(|| format!("Failed to spawn {}", program))?;

    let stdout_handle = child.stdout.take().map(|mut out| {
        thread::spawn(move || {
            let mut s = String::new();
            let _ = out.read_to_string(&mut s);
            s
        })
    });
    let stderr_handle = child.stderr.take().map(|mut err| {
        thread::spawn(move || {
            let mut s = String::new();
            let _ = err.read_to_string(&mut s);
            s
        })
    });

    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stdout = stdout_handle
                    .map(|h| h.join().unwrap_or_default())
                    .unwrap_or_default();
                let stderr = stderr_handle
                    .map(|h| h.join().unwrap_or_default())
                    .unwrap_or_default();
                return Ok(CommandOutput {
                    stdout,
                    stderr,
                    exit_code: status.code().unwrap_or(-1),
                    timed_out: false,
                });
            }
            Ok(None) => {}
            Err(e) => {
                let _ = stdout_handle.map(|h| h.join());
                let _ = stderr_handle.map(|h| h.join());
                return Err(anyhow::anyhow!("Failed to wait for {}: {}", program, e));
            }
        }

        if start.elapsed() > timeout {
            let _ = child.kill();
            let _ = child.wait();
            let _ = stdout_handle.map(|h| h.join());
            let _ = stderr_handle.map(|h| h.join());
            return Ok(CommandOutput {
                stdout: String::new(),
                stderr: format!(
                    "{} killed: exceeded timeout of {} seconds",
                    program,
                    timeout.as_secs()
                ),
                exit_code: -1,
                timed_out: true,
            });
        }

        thread::sleep(CHECK_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout_and_exit_code() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo hello"]);
        let out = run_with_timeout(&mut cmd, Duration::from_secs(10)).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn test_nonzero_exit_is_not_success() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo broken >&2; exit 3"]);
        let out = run_with_timeout(&mut cmd, Duration::from_secs(10)).unwrap();
        assert!(!out.success());
        assert_eq!(out.exit_code, 3);
        assert_eq!(out.diagnostic(), "broken");
    }

    #[test]
    fn test_timeout_kills_child() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "sleep 30"]);
        let start = Instant::now();
        let out = run_with_timeout(&mut cmd, Duration::from_secs(1)).unwrap();
        assert!(out.timed_out);
        assert!(!out.success());
        assert!(start.elapsed() < Duration::from_secs(10));
    }
}
