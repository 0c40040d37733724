//! Container introspection through the `docker` binary.

use easy_common::config::EasyConfig;
use easy_common::error::{EasyError, Result};

use crate::compose::ComposeRunner;
use crate::tool::{IoMode, ProcessOutput, Tool};

const DOCKER_HINT: &str = "install Docker: https://docs.docker.com/get-docker/";
const PS_FORMAT: &str = "{{.ID}}|{{.Names}}|{{.Image}}|{{.Status}}|{{.Ports}}";
const DEFAULT_SHELL: &str = "/bin/sh";

/// One running container as reported by `docker ps`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    /// Short container id.
    pub id: String,
    /// Container name.
    pub name: String,
    /// Image reference.
    pub image: String,
    /// Human-readable status (e.g. `Up 5 minutes`).
    pub status: String,
    /// Published ports, possibly empty.
    pub ports: String,
}

impl ContainerSummary {
    /// Parses one `PS_FORMAT` line; `None` for blank or short lines.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let mut fields = line.splitn(5, '|');
        let id = fields.next()?.to_string();
        let name = fields.next()?.to_string();
        let image = fields.next()?.to_string();
        let status = fields.next()?.to_string();
        let ports = fields.next().unwrap_or_default().to_string();
        Some(Self {
            id,
            name,
            image,
            status,
            ports,
        })
    }
}

/// Client for the container introspection binary.
#[derive(Debug, Clone)]
pub struct DockerClient {
    tool: Tool,
}

impl DockerClient {
    /// Wraps an already configured tool.
    #[must_use]
    pub const fn new(tool: Tool) -> Self {
        Self { tool }
    }

    /// Builds the client from `docker_binary`.
    #[must_use]
    pub fn from_config(config: &EasyConfig) -> Self {
        Self::new(Tool::new(&config.docker_binary, DOCKER_HINT))
    }

    /// Returns `true` if `docker ps` succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`EasyError::BinaryNotFound`] if docker is not installed.
    pub fn is_daemon_running(&self) -> Result<bool> {
        match self.tool.run(None, &["ps"], IoMode::Captured) {
            Ok(_) => Ok(true),
            Err(EasyError::NonZeroExit { .. } | EasyError::SignalTerminated { .. }) => Ok(false),
            Err(other) => Err(other),
        }
    }

    /// Lists running containers.
    ///
    /// # Errors
    ///
    /// See [`Tool::run`].
    pub fn ps(&self) -> Result<Vec<ContainerSummary>> {
        let out = self.tool.run(None, &["ps", "--format", PS_FORMAT], IoMode::Captured)?;
        Ok(out.stdout.lines().filter_map(ContainerSummary::parse_line).collect())
    }

    /// Name of the first running container whose name contains `service`.
    ///
    /// # Errors
    ///
    /// See [`Tool::run`].
    pub fn find_container(&self, service: &str) -> Result<Option<String>> {
        let filter = format!("name={service}");
        let out = self.tool.run(
            None,
            &["ps", "--filter", filter.as_str(), "--format", "{{.Names}}"],
            IoMode::Captured,
        )?;
        Ok(first_name(&out.stdout))
    }

    /// Runs a command in a container, attached to the terminal.
    ///
    /// An empty command opens `/bin/sh`, which always gets a TTY.
    ///
    /// # Errors
    ///
    /// See [`Tool::run`].
    pub fn exec(&self, container: &str, command: &[String], interactive: bool) -> Result<ProcessOutput> {
        let args = exec_args(container, command, interactive);
        tracing::info!(container, interactive, "exec into container");
        self.tool.run(None, &args, IoMode::Inherited)
    }

    /// Returns `docker --version`.
    ///
    /// # Errors
    ///
    /// See [`Tool::run`].
    pub fn version(&self) -> Result<String> {
        let out = self.tool.run(None, &["--version"], IoMode::Captured)?;
        Ok(out.stdout.trim().to_string())
    }
}

fn exec_args(container: &str, command: &[String], interactive: bool) -> Vec<String> {
    let mut args = vec!["exec".to_string()];
    if interactive || command.is_empty() {
        args.push("-it".to_string());
    }
    args.push(container.to_string());
    if command.is_empty() {
        args.push(DEFAULT_SHELL.to_string());
    } else {
        args.extend_from_slice(command);
    }
    args
}

fn first_name(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(ToString::to_string)
}

/// Checks that both binaries are usable before a lifecycle command.
///
/// # Errors
///
/// Returns [`EasyError::BinaryNotFound`] for a missing binary, or
/// [`EasyError::Config`] if the docker daemon is not running.
pub fn verify_environment(compose: &ComposeRunner, docker: &DockerClient) -> Result<()> {
    let _ = compose.tool().locate()?;
    if !docker.is_daemon_running()? {
        return Err(EasyError::Config {
            message: "Docker is not running; start Docker Desktop or the Docker daemon".into(),
        });
    }
    tracing::debug!("container environment verified");
    Ok(())
}
