//! `easy restart`: Stop then start a service.

use clap::Args;
use easy_runtime::verify_environment;

use crate::context::Context;
use crate::output::{BOLD, GREEN, RESET, report_interrupt};

/// Arguments for the `restart` command.
#[derive(Args, Debug)]
pub struct RestartArgs {
    /// Service name.
    pub service: String,
}

/// Executes the `restart` command.
///
/// # Errors
///
/// Returns an error if the service is not installed or either verb fails.
pub fn execute(ctx: &Context, args: &RestartArgs) -> anyhow::Result<()> {
    let compose = ctx.compose();
    verify_environment(&compose, &ctx.docker())?;
    let (_, path) = ctx.installed(&args.service)?;

    let out = compose.restart(&path)?;
    if report_interrupt(&out) {
        return Ok(());
    }
    println!();
    println!("  {GREEN}✓{RESET} {BOLD}{}{RESET} restarted", args.service);
    Ok(())
}
