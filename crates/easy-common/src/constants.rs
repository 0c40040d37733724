//! System-wide constants and default paths.

use std::path::PathBuf;

/// Name of the per-user data directory under `$HOME`.
pub const DATA_DIR_NAME: &str = ".easy-containers";

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "EASY_CONTAINERS_HOME";

/// File name of the compose descriptor. Its presence defines "installed".
pub const DESCRIPTOR_FILE: &str = "docker-compose.yml";

/// File name of the optional bundle readme.
pub const README_FILE: &str = "README.md";

/// File name of the per-bundle environment file.
pub const ENV_FILE: &str = ".env";

/// Candidate names of an environment sample, in lookup order.
pub const ENV_SAMPLE_FILES: [&str; 4] = ["env.sample", ".env.sample", ".env.example", "env.example"];

/// Optional configuration file inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Prefix of staging directories created inside the bundle root.
pub const STAGING_PREFIX: &str = ".staging-";

/// GitHub repository hosting the service catalog.
pub const CATALOG_REPO: &str = "arjavdongaonkar/easy-containers";

/// Branch of the catalog repository.
pub const CATALOG_BRANCH: &str = "main";

/// Directory of the catalog repository holding one subdirectory per service.
pub const SERVICES_ROOT: &str = "services";

/// Default request timeout for catalog calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with catalog requests.
pub const USER_AGENT: &str = "easy-containers-cli";

/// Default orchestration binary.
pub const COMPOSE_BINARY: &str = "docker-compose";

/// Default container introspection binary.
pub const DOCKER_BINARY: &str = "docker";

/// Default git binary used for sparse fetches.
pub const GIT_BINARY: &str = "git";

/// Application name used in CLI output.
pub const APP_NAME: &str = "easy-containers";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "easy";

/// Returns the default data directory.
///
/// Prefers `$EASY_CONTAINERS_HOME`, then `$HOME/.easy-containers`
/// (`USERPROFILE` on Windows), falling back to a relative
/// `.easy-containers` when no home directory is known.
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(HOME_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_or_else(|_| PathBuf::from(DATA_DIR_NAME), |home| PathBuf::from(home).join(DATA_DIR_NAME))
}
