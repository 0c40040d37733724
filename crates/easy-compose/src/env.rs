//! Per-bundle `.env` handling.
//!
//! Bundles may ship a sample (`env.sample`, `.env.example`, ...) from
//! which the user's `.env` is created, reset or edited.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use easy_common::constants::{ENV_FILE, ENV_SAMPLE_FILES};
use easy_common::error::{EasyError, Result};

const EMPTY_ENV: &str = "# Environment configuration\n\n";
const FALLBACK_EDITOR: &str = "nano";

/// One `KEY=value` line with the comment block above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    /// Variable name.
    pub key: String,
    /// Value with surrounding quotes removed.
    pub value: String,
    /// Comment lines directly above, joined with spaces.
    pub comment: String,
}

/// Outcome of [`reset_env`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvReset {
    /// Sample the `.env` was restored from.
    pub sample: PathBuf,
    /// Copy of the previous `.env`, if there was one.
    pub backup: Option<PathBuf>,
}

/// Path of the bundle's `.env`.
#[must_use]
pub fn env_path(dir: &Path) -> PathBuf {
    dir.join(ENV_FILE)
}

/// Finds the bundle's environment sample, trying the known names in order.
#[must_use]
pub fn find_env_sample(dir: &Path) -> Option<PathBuf> {
    ENV_SAMPLE_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Parses dotenv text.
///
/// `#` lines accumulate into the comment of the next entry; a blank line
/// discards the pending comment. Lines without `=` are ignored.
#[must_use]
pub fn parse_env(text: &str) -> Vec<EnvEntry> {
    let mut entries = Vec::new();
    let mut comment = String::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix('#') {
            comment.push_str(rest.trim());
            comment.push(' ');
        } else if let Some((key, value)) = trimmed.split_once('=') {
            entries.push(EnvEntry {
                key: key.trim().to_string(),
                value: unquote(value.trim()).to_string(),
                comment: comment.trim().to_string(),
            });
            comment.clear();
        } else if trimmed.is_empty() {
            comment.clear();
        }
    }
    entries
}

/// Reads and parses an env file. A missing file yields no entries.
///
/// # Errors
///
/// Returns an I/O error if the file exists but cannot be read.
pub fn read_env_file(path: &Path) -> Result<Vec<EnvEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = std::fs::read_to_string(path).map_err(|e| EasyError::io(path, e))?;
    Ok(parse_env(&text))
}

/// Renders entries as a `.env` file for `service`.
#[must_use]
pub fn render_env(service: &str, entries: &[EnvEntry]) -> String {
    let mut out = format!(
        "# {service} configuration\n# Generated by easy-containers on {}\n\n",
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    );
    for entry in entries {
        if !entry.comment.is_empty() {
            let _ = writeln!(out, "# {}", entry.comment);
        }
        let _ = writeln!(out, "{}={}\n", entry.key, entry.value);
    }
    out
}

/// Restores `.env` from the sample, backing up any existing `.env` as
/// `.env.backup-<unix-millis>`.
///
/// # Errors
///
/// Returns [`EasyError::NotFound`] if the bundle has no sample, or an I/O
/// error if a copy fails.
pub fn reset_env(dir: &Path) -> Result<EnvReset> {
    let sample = find_env_sample(dir).ok_or_else(|| EasyError::NotFound {
        kind: "env sample",
        id: dir.display().to_string(),
    })?;
    let env = env_path(dir);
    let backup = if env.exists() {
        let backup = dir.join(format!(
            "{ENV_FILE}.backup-{}",
            chrono::Utc::now().timestamp_millis()
        ));
        copy_file(&env, &backup)?;
        Some(backup)
    } else {
        None
    };
    copy_file(&sample, &env)?;
    tracing::info!(path = %env.display(), sample = %sample.display(), "reset environment file");
    Ok(EnvReset { sample, backup })
}

/// Makes sure `.env` exists before opening it in an editor.
///
/// A missing `.env` is created from the sample, or with a header only.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created.
pub fn prepare_for_edit(dir: &Path) -> Result<PathBuf> {
    let env = env_path(dir);
    if env.exists() {
        return Ok(env);
    }
    match find_env_sample(dir) {
        Some(sample) => copy_file(&sample, &env)?,
        None => std::fs::write(&env, EMPTY_ENV).map_err(|e| EasyError::io(&env, e))?,
    }
    tracing::debug!(path = %env.display(), "created environment file");
    Ok(env)
}

/// Editor to launch: `$VISUAL`, then `$EDITOR`, then `nano`.
#[must_use]
pub fn editor() -> String {
    pick_editor(std::env::var("VISUAL").ok(), std::env::var("EDITOR").ok())
}

fn pick_editor(visual: Option<String>, editor: Option<String>) -> String {
    visual
        .into_iter()
        .chain(editor)
        .find(|e| !e.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

/// Sets one variable in `.env`, replacing an existing assignment or
/// appending a new one. The file is created first if needed.
///
/// # Errors
///
/// Returns [`EasyError::Config`] for an invalid key, or an I/O error.
pub fn set_env(dir: &Path, key: &str, value: &str) -> Result<PathBuf> {
    let key = key.trim();
    if key.is_empty() || key.contains(['=', '#']) || key.contains(char::is_whitespace) {
        return Err(EasyError::Config {
            message: format!("invalid environment variable name {key:?}"),
        });
    }
    let env = prepare_for_edit(dir)?;
    let text = std::fs::read_to_string(&env).map_err(|e| EasyError::io(&env, e))?;

    let assignment = format!("{key}={value}");
    let mut replaced = false;
    let mut lines: Vec<String> = text
        .lines()
        .map(|line| {
            let trimmed = line.trim();
            let matches = !trimmed.starts_with('#')
                && trimmed.split_once('=').is_some_and(|(k, _)| k.trim() == key);
            if matches && !replaced {
                replaced = true;
                assignment.clone()
            } else {
                line.to_string()
            }
        })
        .collect();
    if !replaced {
        lines.push(assignment);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    std::fs::write(&env, out).map_err(|e| EasyError::io(&env, e))?;
    tracing::info!(path = %env.display(), key, replaced, "updated environment variable");
    Ok(env)
}

fn unquote(value: &str) -> &str {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let _ = std::fs::copy(from, to).map_err(|e| EasyError::io(to, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_env_sample_follows_lookup_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(find_env_sample(dir.path()).is_none());

        std::fs::write(dir.path().join("env.example"), "A=1\n").expect("write");
        std::fs::write(dir.path().join(".env.sample"), "A=2\n").expect("write");
        assert_eq!(find_env_sample(dir.path()), Some(dir.path().join(".env.sample")));

        std::fs::write(dir.path().join("env.sample"), "A=3\n").expect("write");
        assert_eq!(find_env_sample(dir.path()), Some(dir.path().join("env.sample")));
    }

    #[test]
    fn parse_env_attaches_comments_and_strips_quotes() {
        let entries = parse_env(
            "# Database password\n# keep it secret\nDB_PASSWORD=\"s3cr=t\"\n\n# orphan comment\n\nPORT = 5432\nNAME='app'\ngarbage line\n",
        );
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].key, "DB_PASSWORD");
        assert_eq!(entries[0].value, "s3cr=t");
        assert_eq!(entries[0].comment, "Database password keep it secret");
        assert_eq!(entries[1].key, "PORT");
        assert_eq!(entries[1].value, "5432");
        assert_eq!(entries[1].comment, "");
        assert_eq!(entries[2].value, "app");
    }

    #[test]
    fn render_env_writes_header_comments_and_values() {
        let text = render_env(
            "redis",
            &[EnvEntry {
                key: "REDIS_PORT".into(),
                value: "6379".into(),
                comment: "Host port".into(),
            }],
        );
        assert!(text.starts_with("# redis configuration\n# Generated by easy-containers on "));
        assert!(text.ends_with("# Host port\nREDIS_PORT=6379\n\n"));
        assert_eq!(parse_env(&text).len(), 1);
    }

    #[test]
    fn reset_env_backs_up_and_copies_sample() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("env.sample"), "PORT=1\n").expect("write");
        std::fs::write(dir.path().join(".env"), "PORT=9\n").expect("write");

        let reset = reset_env(dir.path()).expect("reset");

        let backup = reset.backup.expect("backup");
        let backup_name = backup.file_name().and_then(|n| n.to_str()).expect("name");
        assert!(backup_name.starts_with(".env.backup-"));
        assert_eq!(std::fs::read_to_string(&backup).expect("read"), "PORT=9\n");
        assert_eq!(std::fs::read_to_string(dir.path().join(".env")).expect("read"), "PORT=1\n");
    }

    #[test]
    fn reset_env_without_sample_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = reset_env(dir.path()).unwrap_err();
        assert!(matches!(err, EasyError::NotFound { kind: "env sample", .. }));
    }

    #[test]
    fn prepare_for_edit_creates_from_sample_or_header() {
        let dir = tempfile::tempdir().expect("tempdir");
        let env = prepare_for_edit(dir.path()).expect("prepare");
        assert_eq!(std::fs::read_to_string(&env).expect("read"), EMPTY_ENV);

        let other = tempfile::tempdir().expect("tempdir");
        std::fs::write(other.path().join(".env.example"), "X=1\n").expect("write");
        let env = prepare_for_edit(other.path()).expect("prepare");
        assert_eq!(std::fs::read_to_string(&env).expect("read"), "X=1\n");
    }

    #[test]
    fn pick_editor_prefers_visual_then_editor() {
        assert_eq!(pick_editor(Some("code -w".into()), Some("vim".into())), "code -w");
        assert_eq!(pick_editor(Some(String::new()), Some("vim".into())), "vim");
        assert_eq!(pick_editor(None, None), "nano");
    }

    #[test]
    fn set_env_replaces_or_appends() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(".env"), "# port\nPORT=1\n#PORT=commented\nNAME=x\n")
            .expect("write");

        let _ = set_env(dir.path(), "PORT", "8080").expect("set");
        let _ = set_env(dir.path(), "NEW", "yes").expect("set");

        assert_eq!(
            std::fs::read_to_string(dir.path().join(".env")).expect("read"),
            "# port\nPORT=8080\n#PORT=commented\nNAME=x\nNEW=yes\n"
        );
    }

    #[test]
    fn set_env_rejects_invalid_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        for bad in ["", "A=B", "WITH SPACE", "#X"] {
            assert!(matches!(
                set_env(dir.path(), bad, "1"),
                Err(EasyError::Config { .. })
            ));
        }
        assert!(!dir.path().join(".env").exists());
    }
}
