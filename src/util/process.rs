//! Subprocess execution utilities.
//!
//! Every external program edesto runs (board enumeration, tool probes) is
//! short-lived. A builder with a timeout kills the child once the deadline
//! passes instead of letting one hung tool stall detection.
//!
//! A timed child runs in its own process group. The deadline covers reading
//! its output too: a background process that inherits the pipes and
//! outlives the direct child is killed with the rest of the group.

use std::ffi::OsStr;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How long to keep reading after the process group was killed.
const KILL_GRACE: Duration = Duration::from_millis(500);

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Kill the process if it runs longer than `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        #[cfg(unix)]
        if self.timeout.is_some() {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }
        cmd
    }

    /// Execute the command and wait for completion, honoring the timeout.
    pub fn exec(&self) -> Result<Output> {
        let mut child = self
            .build_command()
            .spawn()
            .with_context(|| format!("failed to spawn `{}`", self.program.display()))?;

        let Some(timeout) = self.timeout else {
            return child
                .wait_with_output()
                .with_context(|| format!("failed to wait for `{}`", self.program.display()));
        };
        let deadline = Instant::now() + timeout;

        // Drain pipes on their own threads so a chatty child cannot block on
        // a full pipe while we poll.
        let (tx, rx) = mpsc::channel();
        drain(child.stdout.take(), Pipe::Stdout, tx.clone());
        drain(child.stderr.take(), Pipe::Stderr, tx);

        let status = match wait_deadline(&mut child, deadline) {
            Ok(status) => status,
            Err(e) => {
                kill_group(&mut child);
                return Err(e)
                    .with_context(|| format!("failed to wait for `{}`", self.program.display()));
            }
        };

        let Some(status) = status else {
            kill_group(&mut child);
            let _ = child.wait();
            bail!(
                "`{}` timed out after {:.1}s",
                self.display_command(),
                timeout.as_secs_f64()
            );
        };

        let mut output = Output {
            status,
            stdout: Vec::new(),
            stderr: Vec::new(),
        };
        if !collect(&rx, deadline, &mut output) {
            tracing::debug!(
                "`{}` left a process holding its output; killing its process group",
                self.display_command()
            );
            kill_group(&mut child);
            collect(&rx, Instant::now() + KILL_GRACE, &mut output);
        }
        Ok(output)
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Copy)]
enum Pipe {
    Stdout,
    Stderr,
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>, which: Pipe, tx: Sender<(Pipe, Vec<u8>)>) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        let _ = tx.send((which, buf));
    });
}

/// Receive drained pipes into `output` until both arrived or `deadline`
/// passed. Returns whether both arrived.
fn collect(rx: &Receiver<(Pipe, Vec<u8>)>, deadline: Instant, output: &mut Output) -> bool {
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok((Pipe::Stdout, buf)) => output.stdout = buf,
            Ok((Pipe::Stderr, buf)) => output.stderr = buf,
            // Both senders dropped: every pipe was delivered.
            Err(RecvTimeoutError::Disconnected) => return true,
            Err(RecvTimeoutError::Timeout) => return false,
        }
    }
}

/// Kill the child and everything it spawned.
#[cfg(unix)]
fn kill_group(child: &mut Child) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Ok(pgid) = i32::try_from(child.id()) else {
        let _ = child.kill();
        return;
    };
    if let Err(e) = killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
        tracing::debug!("failed to kill process group {}: {}", pgid, e);
        let _ = child.kill();
    }
}

#[cfg(not(unix))]
fn kill_group(child: &mut Child) {
    let _ = child.kill();
}

/// Poll the child until it exits or the deadline passes. `None` means the
/// deadline passed first.
fn wait_deadline(child: &mut Child, deadline: Instant) -> std::io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let output = ProcessBuilder::new("echo").arg("hello").exec().unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("hello"));
    }

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("arduino-cli").args(["board", "list", "--format", "json"]);

        assert_eq!(pb.display_command(), "arduino-cli board list --format json");
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_collects_output() {
        let output = ProcessBuilder::new("echo")
            .arg("bounded")
            .timeout(Duration::from_secs(5))
            .exec()
            .unwrap();
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("bounded"));
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_hung_process() {
        let start = Instant::now();
        let err = ProcessBuilder::new("sleep")
            .arg("10")
            .timeout(Duration::from_millis(100))
            .exec()
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_missing_program_is_error() {
        let result = ProcessBuilder::new("definitely-not-a-real-program-edesto")
            .timeout(Duration::from_secs(1))
            .exec();
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_covers_background_children() {
        let start = Instant::now();
        let output = ProcessBuilder::new("sh")
            .args(["-c", "sleep 8 & echo ready"])
            .timeout(Duration::from_secs(1))
            .exec()
            .unwrap();
        assert!(start.elapsed() < Duration::from_secs(4));
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("ready"));
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_whole_group() {
        let start = Instant::now();
        let err = ProcessBuilder::new("sh")
            .args(["-c", "sleep 10 & sleep 10"])
            .timeout(Duration::from_millis(200))
            .exec()
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
        assert!(start.elapsed() < Duration::from_secs(4));
    }
}
