//! `easy status`: Show running containers.

use clap::Args;
use easy_common::constants::BIN_NAME;
use easy_runtime::verify_environment;

use crate::context::Context;
use crate::output::{BOLD, CYAN, DIM, RESET, YELLOW, container_table};

/// Arguments for the `status` command.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show additional information.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Executes the `status` command.
///
/// # Errors
///
/// Returns an error if the container tooling is unusable.
pub fn execute(ctx: &Context, args: &StatusArgs) -> anyhow::Result<()> {
    let docker = ctx.docker();
    verify_environment(&ctx.compose(), &docker)?;

    let containers = docker.ps()?;
    if containers.is_empty() {
        println!();
        println!("  {YELLOW}No containers are currently running.{RESET}");
        println!("  {DIM}Use \"{BIN_NAME} up <service>\" to start a service.{RESET}");
        return Ok(());
    }

    println!();
    println!("  {BOLD}{CYAN}Container status{RESET}");
    println!();
    print!("{}", container_table(&containers));
    println!();
    println!("  {CYAN}Total: {} container(s) running{RESET}", containers.len());

    if args.verbose {
        let installed = ctx.store.list_installed()?;
        println!("  {DIM}Installed services: {}{RESET}", installed.len());
        println!("  {DIM}Bundle root: {}{RESET}", ctx.store.root().display());
        println!("  {DIM}Tip: use \"{BIN_NAME} logs <service>\" to view container logs{RESET}");
    }
    Ok(())
}
