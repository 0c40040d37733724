//! `easy up`: Start a service, installing its bundle on first use.

use clap::Args;
use easy_common::constants::BIN_NAME;
use easy_runtime::verify_environment;

use crate::context::Context;
use crate::output::{BOLD, DIM, GREEN, RESET, YELLOW, report_interrupt};

/// Arguments for the `up` command.
#[derive(Args, Debug)]
pub struct UpArgs {
    /// Service name.
    pub service: String,
}

/// Executes the `up` command.
///
/// Verifies the container tooling, ensures the bundle is installed and
/// runs `up -d` in it.
///
/// # Errors
///
/// Returns an error if the tooling is unusable, acquisition fails or
/// the orchestration binary exits non-zero.
pub fn execute(ctx: &Context, args: &UpArgs) -> anyhow::Result<()> {
    let compose = ctx.compose();
    verify_environment(&compose, &ctx.docker())?;

    let acquired = ctx.pipeline()?.ensure(&args.service)?;
    if let Some(source) = acquired.source {
        eprintln!("  {DIM}Installed {} via {source}{RESET}", args.service);
    }

    let out = compose.up(&acquired.path)?;
    if report_interrupt(&out) {
        return Ok(());
    }

    println!();
    println!("  {GREEN}✓{RESET} {BOLD}{}{RESET} is up and running", args.service);
    println!("  {DIM}Location: {}{RESET}", acquired.path.display());
    println!("  {YELLOW}To stop:{RESET} {BIN_NAME} down {}", args.service);
    Ok(())
}
