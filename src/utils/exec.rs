//! External command execution utilities.
//!
//! Provides a Builder-based API for running external programs with proper
//! output handling and an optional overall time limit.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! // Simple command
//! Cmd::new("chromium").arg("--version").run()?;
//!
//! // Supervised: killed on timeout or Ctrl+C
//! Cmd::new("chromium")
//!     .args(["--headless", "--print-to-pdf=out.pdf", "file:///tmp/doc.html"])
//!     .cwd(root)
//!     .timeout(Duration::from_secs(30))
//!     .run()?;
//! ```

use crate::log;
use crate::utils::state::{DeferInterrupt, is_shutdown};
use regex::Regex;
use std::{
    ffi::{OsStr, OsString},
    io::Read,
    path::{Path, PathBuf},
    process::{Child, Command, ExitStatus, Output, Stdio},
    sync::OnceLock,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};
use thiserror::Error;

/// How often a supervised child is polled for exit
const POLL_INTERVAL: Duration = Duration::from_millis(50);

// ============================================================================
// Errors
// ============================================================================

/// External process failures.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to execute `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for `{program}`")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` did not finish within {}s", .after.as_secs_f32())]
    Timeout { program: String, after: Duration },

    #[error("`{program}` was interrupted")]
    Interrupted { program: String },

    #[error("{message}")]
    Failed { status: ExitStatus, message: String },
}

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
///
/// Provides a fluent API for configuring and running external commands.
#[derive(Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    timeout: Option<Duration>,
    filter: Option<&'static FilterRule>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Add a single argument.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        let arg = arg.as_ref();
        if !arg.is_empty() {
            self.args.push(arg.to_owned());
        }
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            let arg = arg.as_ref();
            if !arg.is_empty() {
                self.args.push(arg.to_owned());
            }
        }
        self
    }

    /// Set working directory.
    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// Bound the whole run. The child is killed when the limit passes or
    /// Ctrl+C is pressed.
    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// Set output filter for logging.
    pub fn filter(mut self, filter: &'static FilterRule) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Execute the command and return output.
    pub fn run(self) -> Result<Output, ExecError> {
        let filter = self.filter.unwrap_or(&EMPTY_FILTER);

        match self.timeout {
            Some(limit) => self.run_supervised(limit, filter),
            None => self.run_simple(filter),
        }
    }

    /// Get the program name for error messages.
    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Simple execution, waiting as long as the program runs.
    fn run_simple(self, filter: &'static FilterRule) -> Result<Output, ExecError> {
        let program = self.program_name();

        let output = self
            .command()
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ExecError::Spawn {
                program: program.clone(),
                source,
            })?;

        log_output(&program, &output, filter)?;
        Ok(output)
    }

    /// Supervised execution: poll until exit, deadline or shutdown.
    fn run_supervised(
        self,
        limit: Duration,
        filter: &'static FilterRule,
    ) -> Result<Output, ExecError> {
        let program = self.program_name();
        let _active = DeferInterrupt::enter();

        let mut child = self
            .command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExecError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match wait_until(&mut child, &program, Instant::now() + limit, limit) {
            Ok(status) => status,
            Err(err) => {
                // Readers are left detached: grandchildren may still hold the pipes.
                terminate(&mut child);
                return Err(err);
            }
        };

        let output = Output {
            status,
            stdout: join(stdout),
            stderr: join(stderr),
        };

        log_output(&program, &output, filter)?;
        Ok(output)
    }
}

/// Poll `child` until it exits, the deadline passes, or Ctrl+C is received.
fn wait_until(
    child: &mut Child,
    program: &str,
    deadline: Instant,
    limit: Duration,
) -> Result<ExitStatus, ExecError> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {}
            Err(source) => {
                return Err(ExecError::Wait {
                    program: program.to_owned(),
                    source,
                });
            }
        }

        if is_shutdown() {
            return Err(ExecError::Interrupted {
                program: program.to_owned(),
            });
        }
        if Instant::now() >= deadline {
            return Err(ExecError::Timeout {
                program: program.to_owned(),
                after: limit,
            });
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Kill and reap a child. Errors mean it already exited.
fn terminate(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Read a pipe to the end on a background thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn join(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

// ============================================================================
// Output Filtering
// ============================================================================

/// Filter rule for command output logging.
///
/// Used to reduce noise by skipping known warnings or irrelevant messages.
pub struct FilterRule {
    /// Prefixes to skip when logging output.
    pub skip_prefixes: &'static [&'static str],
}

impl FilterRule {
    /// Create a new filter rule.
    pub const fn new(skip_prefixes: &'static [&'static str]) -> Self {
        Self { skip_prefixes }
    }

    /// Check if a line should be skipped.
    fn should_skip(&self, line: &str) -> bool {
        line.is_empty() || self.skip_prefixes.iter().any(|p| line.starts_with(p))
    }

    /// Lines that pass the filter.
    fn keep<'a>(&self, output: &'a str) -> Vec<&'a str> {
        output
            .lines()
            .filter(|line| {
                let plain = strip_ansi(line);
                let trimmed = plain.trim();
                !trimmed.is_empty() && !self.should_skip(trimmed)
            })
            .collect()
    }

    /// Log output lines that pass the filter.
    pub fn log(&self, name: &str, output: &str) {
        let lines = self.keep(output);
        if !lines.is_empty() {
            log!(name; "{}", lines.join("\n"));
        }
    }
}

/// Empty filter (no skipping).
pub const EMPTY_FILTER: FilterRule = FilterRule::new(&[]);

// ============================================================================
// Helpers
// ============================================================================

/// Strip ANSI escape codes from string.
fn strip_ansi(s: &str) -> std::borrow::Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());
    re.replace_all(s, "")
}

/// Log command output, returning error on failure.
fn log_output(name: &str, output: &Output, filter: &'static FilterRule) -> Result<(), ExecError> {
    if !output.status.success() {
        return Err(ExecError::Failed {
            status: output.status,
            message: format_error(name, output, filter),
        });
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    filter.log(name, stderr.trim());
    Ok(())
}

/// Format error message for failed command.
fn format_error(name: &str, output: &Output, filter: &'static FilterRule) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let mut msg = format!("Command `{name}` failed with {}", output.status);
    let kept = filter.keep(stderr.trim());
    if !kept.is_empty() {
        msg.push('\n');
        msg.push_str(&kept.join("\n"));
    }

    let stdout_trimmed = stdout.trim();
    if !stdout_trimmed.is_empty() && !stdout_trimmed.starts_with("<!DOCTYPE") {
        msg.push_str("\nStdout:\n");
        msg.push_str(stdout_trimmed);
    }
    msg
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_builder() {
        let cmd = Cmd::new("echo")
            .arg("hello")
            .args(["world", "!"])
            .cwd("/tmp")
            .timeout(Duration::from_secs(3));

        assert_eq!(cmd.program, OsString::from("echo"));
        assert_eq!(cmd.args.len(), 3);
        assert_eq!(cmd.cwd, Some(PathBuf::from("/tmp")));
        assert_eq!(cmd.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_empty_args_filtered() {
        let cmd = Cmd::new("echo").arg("").args(["a", "", "b"]);
        assert_eq!(cmd.args.len(), 2);
    }

    #[test]
    fn test_filter_rule() {
        let filter = FilterRule::new(&["[", "DevTools"]);
        assert!(filter.should_skip("[1234:5678:ERROR:gpu_init.cc] noise"));
        assert!(filter.should_skip("DevTools listening on ws://"));
        assert!(!filter.should_skip("1024 bytes written to file out.pdf"));
        assert!(filter.should_skip(""));
        assert_eq!(
            filter.keep("[1:2:ERROR] x\nreal line\n\n"),
            vec!["real line"]
        );
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[31mRed\x1b[0m"), "Red");
        assert_eq!(strip_ansi("Plain text"), "Plain text");
    }

    #[cfg(unix)]
    #[test]
    fn test_simple_command() {
        let output = Cmd::new("echo").arg("hello").run().unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("hello"));
    }

    #[cfg(unix)]
    #[test]
    fn test_supervised_command_completes() {
        let output = Cmd::new("echo")
            .arg("supervised")
            .timeout(Duration::from_secs(10))
            .run()
            .unwrap();
        assert!(String::from_utf8_lossy(&output.stdout).contains("supervised"));
    }

    #[cfg(unix)]
    #[test]
    fn test_supervised_command_times_out() {
        let started = Instant::now();
        let err = Cmd::new("sleep")
            .arg("5")
            .timeout(Duration::from_millis(200))
            .run()
            .unwrap_err();

        assert!(matches!(err, ExecError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_command_reports_stderr() {
        let err = Cmd::new("sh")
            .args(["-c", "echo broken >&2; exit 3"])
            .timeout(Duration::from_secs(10))
            .run()
            .unwrap_err();

        match err {
            ExecError::Failed { status, message } => {
                assert_eq!(status.code(), Some(3));
                assert!(message.contains("broken"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_program() {
        let err = Cmd::new("pagefix-definitely-missing-program")
            .run()
            .unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
    }
}
