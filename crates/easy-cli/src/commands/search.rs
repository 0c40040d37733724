//! `easy search`: Search the catalog by name.

use clap::Args;
use easy_catalog::search::{describe, search};
use easy_common::constants::BIN_NAME;

use crate::context::Context;
use crate::output::{BOLD, CYAN, DIM, GREEN, RESET, YELLOW, rule};

/// Arguments for the `search` command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Case-insensitive part of a service name.
    pub query: String,
}

/// Executes the `search` command.
///
/// # Errors
///
/// Returns an error for a blank query or if the catalog is unreachable.
pub fn execute(ctx: &Context, args: &SearchArgs) -> anyhow::Result<()> {
    let catalog = ctx.catalog()?;
    let results = search(&catalog, &args.query)?;

    if results.is_empty() {
        println!();
        println!("  {YELLOW}No services found matching \"{}\"{RESET}", args.query);
        println!("  {DIM}Try another term or \"{BIN_NAME} list --all\".{RESET}");
        return Ok(());
    }

    println!();
    println!("  {BOLD}{CYAN}Search results for \"{}\"{RESET}", args.query);
    println!("{}", rule());
    for (i, name) in results.iter().enumerate() {
        println!();
        println!("  {GREEN}{}. {BOLD}{name}{RESET}", i + 1);
        if let Some(description) = describe(name) {
            println!("     {DIM}{description}{RESET}");
        }
        println!("     {DIM}To install: {BIN_NAME} up {name}{RESET}");
    }
    println!("{}", rule());
    println!("  {CYAN}Found {} service(s){RESET}", results.len());
    Ok(())
}
