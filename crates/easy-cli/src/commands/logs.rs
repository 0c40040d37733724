//! `easy logs`: Stream a service's logs.

use clap::Args;
use easy_runtime::{LogOptions, verify_environment};

use crate::context::Context;
use crate::output::{CYAN, RESET, report_interrupt, rule};

/// Arguments for the `logs` command.
#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Service name.
    pub service: String,

    /// Follow log output.
    #[arg(short, long)]
    pub follow: bool,

    /// Number of lines from the end (100 when not following).
    #[arg(short = 'n', long)]
    pub tail: Option<u32>,

    /// Show timestamps.
    #[arg(short, long)]
    pub timestamps: bool,
}

impl LogsArgs {
    fn options(&self) -> LogOptions {
        LogOptions {
            follow: self.follow,
            tail: self.tail,
            timestamps: self.timestamps,
        }
    }
}

/// Executes the `logs` command.
///
/// Ctrl+C stops a followed stream; the child is interrupted and waited
/// for before returning.
///
/// # Errors
///
/// Returns an error if the service is not installed or the orchestration
/// binary fails.
pub fn execute(ctx: &Context, args: &LogsArgs) -> anyhow::Result<()> {
    let compose = ctx.compose();
    verify_environment(&compose, &ctx.docker())?;
    let (_, path) = ctx.installed(&args.service)?;

    println!();
    println!("  {CYAN}Logs for {}{RESET}", args.service);
    println!("{}", rule());
    let out = compose.logs(&path, &args.options())?;
    let _ = report_interrupt(&out);
    Ok(())
}
