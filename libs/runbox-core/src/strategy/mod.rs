/// Per-Language Execution Strategies
///
/// Each strategy follows the same skeleton with language-specific
/// parameters: materialize artifacts, optionally compile, run under the
/// hard timeout, fold captured output into the result. The shared process
/// discipline lives here; the sql strategy never spawns anything.
///
/// Commands are always built as argument vectors - user-controlled text is
/// never interpolated into a shell string.

pub mod interpreted;
pub mod jvm;
pub mod native;
pub mod sql;

use anyhow::{Context, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// Marker used when a run produced no output at all.
pub const NO_OUTPUT: &str = "No output";

/// Raw outcome of one toolchain invocation.
pub struct RunOutcome {
    /// stdout and stderr folded into a single stream, stdout first.
    pub output: String,
    pub timed_out: bool,
    /// Exit status; None when the process was killed by the timeout.
    pub status: Option<std::process::ExitStatus>,
}

impl RunOutcome {
    pub fn succeeded(&self) -> bool {
        self.status.map(|s| s.success()).unwrap_or(false)
    }
}

pub fn or_no_output(output: String) -> String {
    if output.is_empty() {
        NO_OUTPUT.to_string()
    } else {
        output
    }
}

/// Spawn a command with stdin piped in and both output streams captured,
/// enforcing a hard wall-clock timeout.
///
/// On expiry the whole process group is killed and whatever output was
/// captured up to that point is returned. Readers run concurrently with
/// the wait so a chatty process cannot deadlock on a full pipe.
pub async fn run_with_timeout(
    mut cmd: Command,
    stdin_text: &str,
    timeout: Duration,
) -> Result<RunOutcome> {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // Children of the child must die with it on timeout.
    #[cfg(unix)]
    cmd.process_group(0);

    let mut child = cmd.spawn().context("Failed to spawn process")?;

    if let Some(mut pipe) = child.stdin.take() {
        if stdin_text.is_empty() {
            // Close immediately so programs waiting on EOF proceed.
            drop(pipe);
        } else {
            let payload = stdin_text.as_bytes().to_vec();
            // Write concurrently; a process that never reads stdin must
            // not stall the attempt.
            tokio::spawn(async move {
                let _ = pipe.write_all(&payload).await;
                let _ = pipe.shutdown().await;
            });
        }
    }

    let mut stdout_pipe = child
        .stdout
        .take()
        .context("Child stdout was not captured")?;
    let mut stderr_pipe = child
        .stderr
        .take()
        .context("Child stderr was not captured")?;

    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = stdout_pipe.read_to_end(&mut buf).await;
        buf
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = stderr_pipe.read_to_end(&mut buf).await;
        buf
    });

    let (timed_out, status) = match tokio::time::timeout(timeout, child.wait()).await {
        Ok(status) => (false, Some(status.context("Failed to wait on process")?)),
        Err(_) => {
            warn!(timeout_ms = timeout.as_millis() as u64, "Execution timed out, killing process group");
            kill_process_group(&mut child).await;
            (true, None)
        }
    };

    // Pipes close once the process (group) is gone, so these complete.
    let stdout_buf = stdout_task.await.unwrap_or_default();
    let stderr_buf = stderr_task.await.unwrap_or_default();

    let mut output = String::from_utf8_lossy(&stdout_buf).into_owned();
    output.push_str(&String::from_utf8_lossy(&stderr_buf));

    debug!(
        timed_out,
        exit = ?status.map(|s| s.code()),
        output_len = output.len(),
        "Process finished"
    );

    Ok(RunOutcome {
        output,
        timed_out,
        status,
    })
}

async fn kill_process_group(child: &mut Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        // The child was spawned as its own group leader, so its pid is
        // the pgid.
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;
        let _ = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL);
    }

    if let Err(e) = child.kill().await {
        warn!(error = %e, "Failed to kill timed-out process");
    }
    let _ = child.wait().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_no_output() {
        assert_eq!(or_no_output(String::new()), "No output");
        assert_eq!(or_no_output("hi\n".to_string()), "hi\n");
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_captures_stdout_and_stderr_combined() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo out; echo err >&2");
        let outcome = run_with_timeout(cmd, "", Duration::from_secs(5))
            .await
            .unwrap();
        assert!(!outcome.timed_out);
        assert!(outcome.succeeded());
        assert!(outcome.output.contains("out"));
        assert!(outcome.output.contains("err"));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_stdin_is_piped() {
        let cmd = Command::new("cat");
        let outcome = run_with_timeout(cmd, "hello stdin", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(outcome.output, "hello stdin");
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_timeout_kills_and_returns_partial_output() {
        let start = std::time::Instant::now();
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo partial; sleep 30");
        let outcome = run_with_timeout(cmd, "", Duration::from_millis(500))
            .await
            .unwrap();
        assert!(outcome.timed_out);
        assert!(outcome.status.is_none());
        assert!(outcome.output.contains("partial"));
        // Returned within a bounded margin of the configured timeout.
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_nonzero_exit_is_reported_in_status() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("exit 3");
        let outcome = run_with_timeout(cmd, "", Duration::from_secs(5))
            .await
            .unwrap();
        assert!(!outcome.timed_out);
        assert!(!outcome.succeeded());
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let cmd = Command::new("runbox-definitely-not-a-real-binary");
        let result = run_with_timeout(cmd, "", Duration::from_secs(1)).await;
        assert!(result.is_err());
    }
}
