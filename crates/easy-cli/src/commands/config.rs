//! `easy config`: Show or change a service's `.env` configuration.

use std::path::Path;

use anyhow::Context as _;
use clap::Args;
use easy_common::constants::BIN_NAME;
use easy_compose::env::{
    editor, env_path, find_env_sample, parse_env, prepare_for_edit, read_env_file, render_env, reset_env,
    set_env,
};
use easy_runtime::{IoMode, Tool};

use crate::context::Context;
use crate::output::{BOLD, CYAN, DIM, GREEN, RESET, YELLOW, rule};

const EDITOR_HINT: &str = "set $VISUAL or $EDITOR to an installed editor";

/// Arguments for the `config` command.
///
/// Without an action, a missing `.env` is generated from the service's
/// sample with its default values, then the configuration is shown.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Service name.
    pub service: String,

    /// Show the current configuration.
    #[arg(long, conflicts_with_all = ["reset", "edit", "set"])]
    pub show: bool,

    /// Restore `.env` from the sample, keeping a backup.
    #[arg(long, conflicts_with_all = ["edit", "set"])]
    pub reset: bool,

    /// Open `.env` in `$VISUAL` or `$EDITOR`.
    #[arg(long, conflicts_with = "set")]
    pub edit: bool,

    /// Set one variable, e.g. `--set POSTGRES_PASSWORD=secret`.
    #[arg(long, value_name = "KEY=VALUE")]
    pub set: Option<String>,
}

/// Executes the `config` command.
///
/// # Errors
///
/// Returns an error if the service is not installed, the sample is
/// missing for `--reset`, or a file cannot be written.
pub fn execute(ctx: &Context, args: &ConfigArgs) -> anyhow::Result<()> {
    let (name, path) = ctx.installed(&args.service)?;

    if args.reset {
        let reset = reset_env(&path)?;
        if let Some(backup) = &reset.backup {
            println!("  {DIM}Backup created: {}{RESET}", backup.display());
        }
        println!("  {GREEN}✓{RESET} Configuration reset to defaults");
        println!("  {YELLOW}Edit it:{RESET} {BIN_NAME} config {name} --edit");
        return Ok(());
    }

    if args.edit {
        let env = prepare_for_edit(&path)?;
        return open_in_editor(&env, name.as_str());
    }

    if let Some(pair) = &args.set {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("expected KEY=VALUE, got {pair:?}"))?;
        let env = set_env(&path, key, value)?;
        println!("  {GREEN}✓{RESET} {BOLD}{}{RESET} set in {}", key.trim(), env.display());
        println!("  {YELLOW}Restart to apply:{RESET} {BIN_NAME} restart {name}");
        return Ok(());
    }

    if !args.show {
        generate_defaults(&path, name.as_str())?;
    }
    show(&path, name.as_str())
}

/// Writes `.env` from the sample's defaults if it does not exist yet.
fn generate_defaults(dir: &Path, service: &str) -> anyhow::Result<()> {
    let env = env_path(dir);
    if env.exists() {
        return Ok(());
    }
    let Some(sample) = find_env_sample(dir) else {
        return Ok(());
    };
    let text = std::fs::read_to_string(&sample)
        .with_context(|| format!("failed to read {}", sample.display()))?;
    let entries = parse_env(&text);
    if entries.is_empty() {
        println!("  {YELLOW}Sample file is empty or invalid.{RESET}");
        return Ok(());
    }
    std::fs::write(&env, render_env(service, &entries))
        .with_context(|| format!("failed to write {}", env.display()))?;
    println!("  {GREEN}✓{RESET} Created {} with {} default value(s)", env.display(), entries.len());
    Ok(())
}

fn show(dir: &Path, service: &str) -> anyhow::Result<()> {
    let env = env_path(dir);
    if !env.exists() {
        println!();
        println!("  {YELLOW}No .env file found{RESET}");
        println!("  {DIM}Use \"{BIN_NAME} config {service} --edit\" to create one.{RESET}");
        return Ok(());
    }
    let entries = read_env_file(&env)?;

    println!();
    println!("  {BOLD}{CYAN}Current configuration{RESET}");
    println!("{}", rule());
    if entries.is_empty() {
        println!("  {YELLOW}No configuration found{RESET}");
    }
    for entry in &entries {
        println!();
        println!("  {BOLD}{}{RESET}", entry.key);
        let value = if entry.value.is_empty() { "(empty)" } else { entry.value.as_str() };
        println!("    {DIM}Value: {value}{RESET}");
        if !entry.comment.is_empty() {
            println!("    {DIM}Note: {}{RESET}", entry.comment);
        }
    }
    println!("{}", rule());
    println!("  {CYAN}Total: {} variable(s){RESET}", entries.len());
    println!("  {DIM}File: {}{RESET}", env.display());
    Ok(())
}

fn open_in_editor(env: &Path, service: &str) -> anyhow::Result<()> {
    let command = editor();
    let mut parts = command.split_whitespace().map(ToString::to_string);
    let binary = parts.next().unwrap_or_default();
    let tool = Tool::new(binary, EDITOR_HINT).with_base_args(parts.collect());

    println!("  {CYAN}Opening {} in {}...{RESET}", env.display(), tool.binary());
    let _ = tool.run(None, &[env.as_os_str()], IoMode::Inherited)?;
    println!("  {GREEN}✓{RESET} File saved");
    println!("  {YELLOW}Restart to apply:{RESET} {BIN_NAME} restart {service}");
    Ok(())
}
