//! `easy validate`: Static and orchestration-level descriptor checks.

use clap::Args;
use easy_compose::{ValidationReport, validate_bundle};

use crate::context::Context;
use crate::output::{BOLD, CYAN, GREEN, RED, RESET, YELLOW, numbered, rule};

const COMPOSE_REJECTED: &str = "Docker Compose validation failed";

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Service name.
    pub service: String,
}

/// Executes the `validate` command.
///
/// Runs the static checks, then `config --quiet`; a rejected descriptor
/// is recorded as one more issue.
///
/// # Errors
///
/// Returns an error if the service is not installed, the orchestration
/// binary is missing, or any issue was found.
pub fn execute(ctx: &Context, args: &ValidateArgs) -> anyhow::Result<()> {
    let (_, path) = ctx.installed(&args.service)?;

    let mut report = validate_bundle(&path)?;
    if !ctx.compose().config_check(&path)? {
        report.issue(COMPOSE_REJECTED);
    }
    tracing::info!(
        service = %args.service,
        issues = report.issues.len(),
        warnings = report.warnings.len(),
        "validation finished"
    );

    println!();
    println!("  {BOLD}{CYAN}Validation results for {}{RESET}", args.service);
    println!("{}", rule());
    print!("{}", render(&report));
    println!("{}", rule());

    if report.is_valid() {
        println!("  {GREEN}✓ Configuration is valid and ready to use!{RESET}");
        Ok(())
    } else {
        anyhow::bail!("{} issue(s) found; fix them before deploying", report.issues.len())
    }
}

fn render(report: &ValidationReport) -> String {
    if report.is_clean() {
        return format!("\n  {GREEN}No issues or warnings found.{RESET}\n\n");
    }
    let mut out = String::new();
    if !report.issues.is_empty() {
        out.push_str(&format!("\n  {RED}{BOLD}Issues:{RESET}\n"));
        out.push_str(&numbered(&report.issues));
    }
    if !report.warnings.is_empty() {
        out.push_str(&format!("\n  {YELLOW}{BOLD}Warnings:{RESET}\n"));
        out.push_str(&numbered(&report.warnings));
    }
    out.push('\n');
    out
}
