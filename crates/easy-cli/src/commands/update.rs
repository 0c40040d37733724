//! `easy update`: Re-install a service from its sources.

use clap::Args;
use easy_common::constants::BIN_NAME;
use easy_common::types::ServiceName;

use crate::context::Context;
use crate::output::{BOLD, DIM, GREEN, RESET, YELLOW};

/// Arguments for the `update` command.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Service name.
    pub service: String,
}

/// Executes the `update` command.
///
/// The current bundle is copied to the backups directory first. If
/// re-installation fails the backup is left for manual recovery.
///
/// # Errors
///
/// Returns an error if the backup or the re-installation fails.
pub fn execute(ctx: &Context, args: &UpdateArgs) -> anyhow::Result<()> {
    let name = ServiceName::parse(&args.service)?;
    let updated = ctx.pipeline()?.update_bundle(&name)?;

    println!();
    match updated.acquired.source {
        Some(source) => println!("  {GREEN}✓{RESET} {BOLD}{name}{RESET} updated via {source}"),
        None => println!("  {GREEN}✓{RESET} {BOLD}{name}{RESET} is installed"),
    }
    if let Some(backup) = &updated.backup {
        println!("  {DIM}Previous copy: {}{RESET}", backup.display());
    }
    println!("  {YELLOW}To apply:{RESET} {BIN_NAME} restart {name}");
    Ok(())
}
