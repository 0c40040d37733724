//! Spawning external binaries.
//!
//! [`Tool::run`] is the only place a child process is started. The I/O
//! mode is chosen by the caller: captured output for probes and listings,
//! inherited terminal for streaming and interactive verbs.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use easy_common::error::{EasyError, Result};

use crate::signal;

/// How the child's standard streams are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoMode {
    /// Stdout and stderr are buffered and returned.
    Captured,
    /// The child uses the parent's terminal directly.
    Inherited,
}

/// Result of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code (0, or the child's code after an interrupt).
    pub exit_code: i32,
    /// Captured stdout; empty in inherited mode.
    pub stdout: String,
    /// Captured stderr; empty in inherited mode.
    pub stderr: String,
    /// The user interrupted an inherited run and the child has exited.
    pub interrupted: bool,
}

/// An external binary plus arguments placed before every verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    binary: String,
    base_args: Vec<String>,
    hint: String,
}

impl Tool {
    /// Creates a tool; `hint` tells the user how to install it.
    #[must_use]
    pub fn new(binary: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            base_args: Vec::new(),
            hint: hint.into(),
        }
    }

    /// Sets arguments prepended to every invocation (e.g. `compose`).
    #[must_use]
    pub fn with_base_args(mut self, args: Vec<String>) -> Self {
        self.base_args = args;
        self
    }

    /// Name of the binary.
    #[must_use]
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Resolves the binary on the `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`EasyError::BinaryNotFound`] with the install hint.
    pub fn locate(&self) -> Result<PathBuf> {
        which::which(&self.binary).map_err(|_| EasyError::BinaryNotFound {
            binary: self.binary.clone(),
            hint: self.hint.clone(),
        })
    }

    /// Returns `true` if the binary is on the `PATH`.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.locate().is_ok()
    }

    /// Runs `<binary> <base_args> <args>` in `cwd`.
    ///
    /// In inherited mode the child is registered for Ctrl+C forwarding and
    /// always waited for. A child that ends after the user interrupted it
    /// is reported as `Ok` with [`ProcessOutput::interrupted`] set.
    ///
    /// # Errors
    ///
    /// - [`EasyError::BinaryNotFound`] if the binary is not installed.
    /// - [`EasyError::NonZeroExit`] for a non-zero exit code.
    /// - [`EasyError::SignalTerminated`] if the child was killed by a signal.
    pub fn run<S: AsRef<OsStr>>(&self, cwd: Option<&Path>, args: &[S], mode: IoMode) -> Result<ProcessOutput> {
        let program = self.locate()?;
        let verb = args
            .first()
            .map(|a| a.as_ref().to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut command = Command::new(&program);
        let _ = command.args(&self.base_args).args(args);
        if let Some(dir) = cwd {
            let _ = command.current_dir(dir);
        }
        tracing::debug!(binary = %self.binary, verb = %verb, ?mode, cwd = ?cwd, "spawning");

        match mode {
            IoMode::Captured => {
                let output = command
                    .stdin(Stdio::null())
                    .output()
                    .map_err(|e| self.spawn_error(&program, e))?;
                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                let exit_code = self.check(output.status, &verb, &stderr)?;
                Ok(ProcessOutput {
                    exit_code,
                    stdout,
                    stderr,
                    interrupted: false,
                })
            }
            IoMode::Inherited => {
                signal::install()?;
                let _ = signal::take_interrupt();
                let mut child = command.spawn().map_err(|e| self.spawn_error(&program, e))?;
                let status = {
                    let _guard = signal::register_foreground(child.id());
                    tracing::info!(binary = %self.binary, verb = %verb, pid = child.id(), "child spawned");
                    child.wait().map_err(|e| EasyError::io(&program, e))?
                };
                if signal::take_interrupt() {
                    tracing::info!(binary = %self.binary, verb = %verb, "child finished after interrupt");
                    return Ok(ProcessOutput {
                        exit_code: status.code().unwrap_or(130),
                        interrupted: true,
                        ..ProcessOutput::default()
                    });
                }
                let exit_code = self.check(status, &verb, "")?;
                Ok(ProcessOutput {
                    exit_code,
                    ..ProcessOutput::default()
                })
            }
        }
    }

    fn check(&self, status: ExitStatus, verb: &str, stderr: &str) -> Result<i32> {
        match status.code() {
            Some(0) => Ok(0),
            Some(code) => Err(EasyError::NonZeroExit {
                binary: self.binary.clone(),
                verb: verb.to_string(),
                code,
                stderr: stderr.to_string(),
            }),
            None => Err(EasyError::SignalTerminated {
                binary: self.binary.clone(),
                verb: verb.to_string(),
                signal: terminating_signal(status),
            }),
        }
    }

    fn spawn_error(&self, program: &Path, error: std::io::Error) -> EasyError {
        if error.kind() == std::io::ErrorKind::NotFound {
            EasyError::BinaryNotFound {
                binary: self.binary.clone(),
                hint: self.hint.clone(),
            }
        } else {
            EasyError::io(program, error)
        }
    }
}

#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().unwrap_or(0)
}

#[cfg(not(unix))]
const fn terminating_signal(_status: ExitStatus) -> i32 {
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_missing_binary_is_binary_not_found() {
        let tool = Tool::new("easy-containers-no-such-binary", "install it");
        let err = tool.run(None, &["up"], IoMode::Captured).unwrap_err();
        match err {
            EasyError::BinaryNotFound { binary, hint } => {
                assert_eq!(binary, "easy-containers-no-such-binary");
                assert_eq!(hint, "install it");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn run_captured_returns_stdout() {
        let tool = Tool::new("sh", "");
        let out = tool
            .run(None, &["-c", "printf hello; printf oops >&2"], IoMode::Captured)
            .expect("run");
        assert_eq!(out.exit_code, 0);
        assert_eq!(out.stdout, "hello");
        assert_eq!(out.stderr, "oops");
        assert!(!out.interrupted);
    }

    #[cfg(unix)]
    #[test]
    fn run_captured_non_zero_is_structured() {
        let tool = Tool::new("sh", "");
        let err = tool
            .run(None, &["-c", "echo broken >&2; exit 3"], IoMode::Captured)
            .unwrap_err();
        match err {
            EasyError::NonZeroExit { binary, verb, code, stderr } => {
                assert_eq!(binary, "sh");
                assert_eq!(verb, "-c");
                assert_eq!(code, 3);
                assert_eq!(stderr.trim(), "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn run_uses_working_directory_and_base_args() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tool = Tool::new("sh", "").with_base_args(vec!["-c".into()]);
        let out = tool.run(Some(dir.path()), &["pwd"], IoMode::Captured).expect("run");
        let reported = std::fs::canonicalize(out.stdout.trim()).expect("canonical");
        assert_eq!(reported, std::fs::canonicalize(dir.path()).expect("canonical"));
    }

    #[cfg(unix)]
    #[test]
    fn run_killed_child_is_signal_terminated() {
        let tool = Tool::new("sh", "");
        let err = tool.run(None, &["-c", "kill -9 $$"], IoMode::Captured).unwrap_err();
        assert!(
            matches!(err, EasyError::SignalTerminated { signal: 9, .. }),
            "got {err}"
        );
    }
}
