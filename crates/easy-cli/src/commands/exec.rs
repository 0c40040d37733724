//! `easy exec`: Execute a command inside a service's running container.

use clap::Args;
use easy_common::constants::BIN_NAME;
use easy_runtime::verify_environment;

use crate::context::Context;
use crate::output::{CYAN, DIM, RESET, report_interrupt, rule};

/// Arguments for the `exec` command.
#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Service name.
    pub service: String,

    /// Command to execute; opens `/bin/sh` when omitted.
    #[arg(trailing_var_arg = true)]
    pub command: Vec<String>,

    /// Do not allocate a TTY or keep stdin open.
    #[arg(short = 'T', long)]
    pub no_tty: bool,
}

/// Executes the `exec` command.
///
/// # Errors
///
/// Returns an error if the service is not installed, has no running
/// container, or the command exits non-zero.
pub fn execute(ctx: &Context, args: &ExecArgs) -> anyhow::Result<()> {
    let docker = ctx.docker();
    verify_environment(&ctx.compose(), &docker)?;
    let _ = ctx.installed(&args.service)?;

    let Some(container) = docker.find_container(&args.service)? else {
        anyhow::bail!(
            "no running container found for \"{}\"\nStart the service first: {BIN_NAME} up {}",
            args.service,
            args.service
        );
    };

    println!();
    println!("  {CYAN}Executing in {container}{RESET}");
    println!("{}", rule());
    if args.command.is_empty() {
        println!("  {DIM}Opening interactive shell...{RESET}");
    }
    let out = docker.exec(&container, &args.command, !args.no_tty)?;
    let _ = report_interrupt(&out);
    Ok(())
}
