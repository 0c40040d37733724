//! `easy download`: Install a service bundle without starting it.

use clap::Args;
use easy_common::constants::BIN_NAME;

use crate::context::Context;
use crate::output::{BOLD, DIM, GREEN, RESET, YELLOW};

/// Arguments for the `download` command.
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Service name.
    pub service: String,
}

/// Executes the `download` command.
///
/// # Errors
///
/// Returns an error if every acquisition strategy fails.
pub fn execute(ctx: &Context, args: &DownloadArgs) -> anyhow::Result<()> {
    let acquired = ctx.pipeline()?.ensure(&args.service)?;

    println!();
    match acquired.source {
        Some(source) => println!("  {GREEN}✓{RESET} {BOLD}{}{RESET} installed via {source}", args.service),
        None => println!("  {GREEN}✓{RESET} {BOLD}{}{RESET} is already installed", args.service),
    }
    println!("  {DIM}Location: {}{RESET}", acquired.path.display());
    println!("  {YELLOW}To start:{RESET} {BIN_NAME} up {}", args.service);
    Ok(())
}
