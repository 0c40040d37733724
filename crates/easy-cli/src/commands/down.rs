//! `easy down`: Stop and remove a service's containers.

use clap::Args;
use easy_runtime::verify_environment;

use crate::context::Context;
use crate::output::{BOLD, GREEN, RESET, report_interrupt};

/// Arguments for the `down` command.
#[derive(Args, Debug)]
pub struct DownArgs {
    /// Service name.
    pub service: String,

    /// Also remove named volumes.
    #[arg(short, long)]
    pub volumes: bool,
}

/// Executes the `down` command.
///
/// # Errors
///
/// Returns an error if the service is not installed or the orchestration
/// binary fails.
pub fn execute(ctx: &Context, args: &DownArgs) -> anyhow::Result<()> {
    let compose = ctx.compose();
    verify_environment(&compose, &ctx.docker())?;
    let (_, path) = ctx.installed(&args.service)?;

    let out = compose.down(&path, args.volumes)?;
    if report_interrupt(&out) {
        return Ok(());
    }
    println!();
    println!("  {GREEN}✓{RESET} {BOLD}{}{RESET} stopped", args.service);
    if args.volumes {
        println!("  Named volumes removed.");
    }
    Ok(())
}
