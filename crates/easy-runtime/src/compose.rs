//! Lifecycle verbs of the orchestration binary.

use std::path::Path;

use easy_common::config::EasyConfig;
use easy_common::error::{EasyError, Result};

use crate::tool::{IoMode, ProcessOutput, Tool};

const COMPOSE_HINT: &str = "install Docker Compose: https://docs.docker.com/compose/install/";
const DEFAULT_TAIL: u32 = 100;

/// Options for `logs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Keep streaming new lines.
    pub follow: bool,
    /// Number of trailing lines; 100 when unset and not following.
    pub tail: Option<u32>,
    /// Prefix lines with timestamps.
    pub timestamps: bool,
}

impl LogOptions {
    /// Arguments after the `logs` verb.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.follow {
            args.push("--follow".to_string());
        }
        match (self.tail, self.follow) {
            (Some(n), _) => args.extend(["--tail".to_string(), n.to_string()]),
            (None, false) => args.extend(["--tail".to_string(), DEFAULT_TAIL.to_string()]),
            (None, true) => {}
        }
        if self.timestamps {
            args.push("-t".to_string());
        }
        args
    }
}

/// Runs orchestration verbs with a bundle as working directory.
#[derive(Debug, Clone)]
pub struct ComposeRunner {
    tool: Tool,
}

impl ComposeRunner {
    /// Wraps an already configured tool.
    #[must_use]
    pub const fn new(tool: Tool) -> Self {
        Self { tool }
    }

    /// Builds the runner from `compose_binary` and `compose_args`.
    #[must_use]
    pub fn from_config(config: &EasyConfig) -> Self {
        Self::new(Tool::new(&config.compose_binary, COMPOSE_HINT).with_base_args(config.compose_args.clone()))
    }

    /// The underlying tool.
    #[must_use]
    pub const fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Runs `<verb> <extra...>` in `bundle`.
    ///
    /// # Errors
    ///
    /// See [`Tool::run`].
    pub fn run(&self, bundle: &Path, verb: &str, extra: &[String], mode: IoMode) -> Result<ProcessOutput> {
        let mut args = Vec::with_capacity(extra.len() + 1);
        args.push(verb.to_string());
        args.extend_from_slice(extra);
        tracing::info!(bundle = %bundle.display(), verb, "running orchestration verb");
        self.tool.run(Some(bundle), &args, mode)
    }

    /// Starts the bundle's containers in the background (`up -d`).
    ///
    /// # Errors
    ///
    /// See [`Tool::run`].
    pub fn up(&self, bundle: &Path) -> Result<ProcessOutput> {
        self.run(bundle, "up", &["-d".to_string()], IoMode::Inherited)
    }

    /// Stops and removes the bundle's containers, and optionally volumes.
    ///
    /// # Errors
    ///
    /// See [`Tool::run`].
    pub fn down(&self, bundle: &Path, volumes: bool) -> Result<ProcessOutput> {
        let extra = if volumes { vec!["-v".to_string()] } else { Vec::new() };
        self.run(bundle, "down", &extra, IoMode::Inherited)
    }

    /// Pulls the bundle's images.
    ///
    /// # Errors
    ///
    /// See [`Tool::run`].
    pub fn pull(&self, bundle: &Path) -> Result<ProcessOutput> {
        self.run(bundle, "pull", &[], IoMode::Captured)
    }

    /// Streams the bundle's logs to the terminal.
    ///
    /// # Errors
    ///
    /// See [`Tool::run`].
    pub fn logs(&self, bundle: &Path, options: &LogOptions) -> Result<ProcessOutput> {
        self.run(bundle, "logs", &options.args(), IoMode::Inherited)
    }

    /// Runs `config --quiet`. A non-zero exit is a finding, not an error.
    ///
    /// # Errors
    ///
    /// Returns errors other than [`EasyError::NonZeroExit`], notably
    /// [`EasyError::BinaryNotFound`].
    pub fn config_check(&self, bundle: &Path) -> Result<bool> {
        match self.run(bundle, "config", &["--quiet".to_string()], IoMode::Captured) {
            Ok(_) => Ok(true),
            Err(EasyError::NonZeroExit { code, stderr, .. }) => {
                tracing::debug!(code, stderr = %stderr.trim(), "config check rejected descriptor");
                Ok(false)
            }
            Err(other) => Err(other),
        }
    }

    /// Stops then starts the bundle.
    ///
    /// # Errors
    ///
    /// See [`Tool::run`]; `up` is not attempted if `down` fails.
    pub fn restart(&self, bundle: &Path) -> Result<ProcessOutput> {
        let down = self.down(bundle, false)?;
        if down.interrupted {
            return Ok(down);
        }
        self.up(bundle)
    }

    /// Returns the binary's version line.
    ///
    /// # Errors
    ///
    /// See [`Tool::run`].
    pub fn version(&self) -> Result<String> {
        let out = self.tool.run(None, &["--version"], IoMode::Captured)?;
        Ok(out.stdout.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_args_default_tail_when_not_following() {
        assert_eq!(LogOptions::default().args(), vec!["--tail", "100"]);
    }

    #[test]
    fn log_args_follow_without_tail() {
        let opts = LogOptions {
            follow: true,
            timestamps: true,
            ..LogOptions::default()
        };
        assert_eq!(opts.args(), vec!["--follow", "-t"]);
    }

    #[test]
    fn log_args_explicit_tail_wins() {
        let opts = LogOptions {
            follow: true,
            tail: Some(20),
            timestamps: false,
        };
        assert_eq!(opts.args(), vec!["--follow", "--tail", "20"]);
    }

    #[test]
    fn from_config_applies_binary_and_base_args() {
        let mut config = EasyConfig::with_data_dir("/tmp/easy");
        config.compose_binary = "docker".into();
        config.compose_args = vec!["compose".into()];
        let runner = ComposeRunner::from_config(&config);
        assert_eq!(
            runner.tool(),
            &Tool::new("docker", COMPOSE_HINT).with_base_args(vec!["compose".into()])
        );
    }

    #[test]
    fn config_check_missing_binary_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = ComposeRunner::new(Tool::new("easy-containers-no-such-compose", COMPOSE_HINT));
        let err = runner.config_check(dir.path()).unwrap_err();
        assert!(err.is_binary_not_found());
    }
}
