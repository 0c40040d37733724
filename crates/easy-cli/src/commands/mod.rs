//! CLI command definitions and dispatch.

pub mod config;
pub mod down;
pub mod download;
pub mod exec;
pub mod init;
pub mod list;
pub mod logs;
pub mod pull;
pub mod restart;
pub mod search;
pub mod show;
pub mod status;
pub mod up;
pub mod update;
pub mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use easy_common::constants::HOME_ENV;

use crate::context::Context;

/// easy: start, stop and inspect container services by name.
#[derive(Parser, Debug)]
#[command(name = "easy", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Data directory holding services, backups and config.json.
    #[arg(long, global = true, env = HOME_ENV)]
    pub home: Option<PathBuf>,

    /// Never touch the network: install from the local mirror or templates.
    #[arg(long, global = true)]
    pub offline: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a service, installing it first if needed.
    Up(up::UpArgs),
    /// Stop and remove a service's containers.
    Down(down::DownArgs),
    /// Stop then start a service.
    Restart(restart::RestartArgs),
    /// Pull the images of a service.
    Pull(pull::PullArgs),
    /// View service logs.
    Logs(logs::LogsArgs),
    /// Execute a command in a running container.
    Exec(exec::ExecArgs),
    /// Show running containers.
    #[command(alias = "ps")]
    Status(status::StatusArgs),
    /// Validate a service's descriptor.
    Validate(validate::ValidateArgs),
    /// List installed services, or the whole catalog.
    #[command(alias = "ls")]
    List(list::ListArgs),
    /// Search the catalog.
    Search(search::SearchArgs),
    /// Display the containers, volumes and networks of a service.
    Show(show::ShowArgs),
    /// Create a new service from a starter template.
    Init(init::InitArgs),
    /// Install a service without starting it.
    Download(download::DownloadArgs),
    /// Re-install a service, keeping a backup of the current copy.
    Update(update::UpdateArgs),
    /// Show or change a service's .env configuration.
    Config(config::ConfigArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::load(cli.home, cli.offline)?;
    match cli.command {
        Command::Up(args) => up::execute(&ctx, &args),
        Command::Down(args) => down::execute(&ctx, &args),
        Command::Restart(args) => restart::execute(&ctx, &args),
        Command::Pull(args) => pull::execute(&ctx, &args),
        Command::Logs(args) => logs::execute(&ctx, &args),
        Command::Exec(args) => exec::execute(&ctx, &args),
        Command::Status(args) => status::execute(&ctx, &args),
        Command::Validate(args) => validate::execute(&ctx, &args),
        Command::List(args) => list::execute(&ctx, &args),
        Command::Search(args) => search::execute(&ctx, &args),
        Command::Show(args) => show::execute(&ctx, &args),
        Command::Init(args) => init::execute(&ctx, &args),
        Command::Download(args) => download::execute(&ctx, &args),
        Command::Update(args) => update::execute(&ctx, &args),
        Command::Config(args) => config::execute(&ctx, &args),
    }
}
