//! `easy list`: List installed services or the whole catalog.

use clap::Args;
use easy_catalog::CatalogSource;
use easy_common::constants::BIN_NAME;

use crate::context::Context;
use crate::output::{BOLD, CYAN, DIM, GREEN, RESET, YELLOW};

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show every service available in the catalog.
    #[arg(short, long)]
    pub all: bool,
}

/// Executes the `list` command.
///
/// # Errors
///
/// Returns an error if the bundle root or the catalog cannot be read.
pub fn execute(ctx: &Context, args: &ListArgs) -> anyhow::Result<()> {
    let installed = ctx.store.list_installed()?;

    if args.all {
        let available = ctx.catalog()?.list_available()?;
        println!();
        println!("  {BOLD}{CYAN}Available services{RESET}");
        println!();
        for name in &available {
            let marker = if installed.iter().any(|i| i.as_str() == name.as_str()) {
                format!(" {GREEN}(installed){RESET}")
            } else {
                String::new()
            };
            println!("  • {name}{marker}");
        }
        println!();
        println!("  {DIM}{} service(s) in the catalog{RESET}", available.len());
        return Ok(());
    }

    if installed.is_empty() {
        println!();
        println!("  {YELLOW}No services installed yet.{RESET}");
        println!("  {DIM}Use \"{BIN_NAME} list --all\" to browse the catalog.{RESET}");
        return Ok(());
    }

    println!();
    println!("  {BOLD}{CYAN}Installed services{RESET}");
    println!();
    for name in &installed {
        let note = if ctx.store.exists(name) { "" } else { " (incomplete)" };
        println!("  • {name}{DIM}{note}{RESET}");
    }
    println!();
    println!("  {DIM}Usage:{RESET}");
    println!("    {BIN_NAME} up <service>    {DIM}Start a service{RESET}");
    println!("    {BIN_NAME} down <service>  {DIM}Stop a service{RESET}");
    Ok(())
}
