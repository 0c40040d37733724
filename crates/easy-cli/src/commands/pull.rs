//! `easy pull`: Pull the images of an installed service.

use clap::Args;
use easy_common::constants::BIN_NAME;
use easy_runtime::verify_environment;

use crate::context::Context;
use crate::output::{BOLD, DIM, GREEN, RESET, YELLOW};

/// Arguments for the `pull` command.
#[derive(Args, Debug)]
pub struct PullArgs {
    /// Service name.
    pub service: String,
}

/// Executes the `pull` command.
///
/// Output is captured and replayed after the pull completes.
///
/// # Errors
///
/// Returns an error if the service is not installed or the pull fails.
pub fn execute(ctx: &Context, args: &PullArgs) -> anyhow::Result<()> {
    let compose = ctx.compose();
    verify_environment(&compose, &ctx.docker())?;
    let (_, path) = ctx.installed(&args.service)?;

    eprintln!("  {DIM}Pulling images for {}...{RESET}", args.service);
    let out = compose.pull(&path)?;
    for line in out.stdout.lines().chain(out.stderr.lines()) {
        println!("  {DIM}{line}{RESET}");
    }
    println!();
    println!("  {GREEN}✓{RESET} Images for {BOLD}{}{RESET} are up to date", args.service);
    println!("  {YELLOW}To apply updates:{RESET} {BIN_NAME} restart {}", args.service);
    Ok(())
}
