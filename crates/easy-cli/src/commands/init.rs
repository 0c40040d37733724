//! `easy init`: Create a new service from a starter template.

use clap::Args;
use easy_common::constants::BIN_NAME;
use easy_common::types::ServiceName;
use easy_template::InitTemplate;

use crate::context::Context;
use crate::output::{BOLD, DIM, GREEN, RESET, YELLOW};

/// Arguments for the `init` command.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Name of the new service.
    pub service: String,

    /// Starter template: basic, database, postgres, mysql, webapp or empty.
    #[arg(short, long, default_value = "basic")]
    pub template: InitTemplate,

    /// Write over an existing service of the same name.
    #[arg(long)]
    pub force: bool,
}

/// Executes the `init` command.
///
/// # Errors
///
/// Returns an error for an invalid name, an existing service without
/// `--force`, or a write failure.
pub fn execute(ctx: &Context, args: &InitArgs) -> anyhow::Result<()> {
    let name = ServiceName::parse(&args.service)?;
    let path = ctx.pipeline()?.init_bundle(&name, args.template, args.force)?;

    println!();
    println!("  {GREEN}✓{RESET} Created {BOLD}{name}{RESET} from the {} template", args.template.label());
    println!("  {DIM}{}{RESET}", args.template.description());
    println!("  {DIM}Location: {}{RESET}", path.display());
    println!();
    println!("  {YELLOW}Next steps:{RESET}");
    println!("    1. Edit {}/docker-compose.yml", path.display());
    println!("    2. {BIN_NAME} validate {name}");
    println!("    3. {BIN_NAME} up {name}");
    Ok(())
}
