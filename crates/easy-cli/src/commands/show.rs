//! `easy show`: Display the containers, volumes and networks of a service.

use clap::Args;
use easy_common::constants::{BIN_NAME, DESCRIPTOR_FILE};
use easy_compose::{BundleSummary, ComposeFile, summarize};

use crate::context::Context;
use crate::output::{BOLD, CYAN, DIM, GREEN, RESET, YELLOW, rule};

/// Arguments for the `show` command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Service name.
    pub service: String,
}

/// Executes the `show` command.
///
/// # Errors
///
/// Returns an error if the service is not installed or its descriptor
/// cannot be parsed.
pub fn execute(ctx: &Context, args: &ShowArgs) -> anyhow::Result<()> {
    let (name, path) = ctx.installed(&args.service)?;
    let file = ComposeFile::load(&ctx.store.descriptor_path(&name))?;

    println!();
    println!("  {BOLD}{CYAN}{}{RESET}", name.as_str().to_uppercase());
    println!("{}", rule());
    println!();
    println!("  {BOLD}Configuration{RESET}");
    println!("    {DIM}Location: {}{RESET}", path.display());
    println!("    {DIM}Compose file: {DESCRIPTOR_FILE}{RESET}");
    print!("{}", render(&summarize(&file)));
    println!("{}", rule());
    println!("  {GREEN}✓ Configuration loaded{RESET}");
    println!();
    println!("  {YELLOW}Quick commands:{RESET}");
    for (verb, what) in [
        ("up", "Start the service"),
        ("down", "Stop the service"),
        ("logs", "View logs"),
        ("restart", "Restart the service"),
    ] {
        println!("    {DIM}{BIN_NAME} {verb} {name}  {what}{RESET}");
    }
    Ok(())
}

fn render(summary: &BundleSummary) -> String {
    let mut out = String::new();
    if !summary.services.is_empty() {
        out.push_str(&format!("\n  {BOLD}Containers{RESET}\n"));
    }
    for service in &summary.services {
        out.push_str(&format!("\n    {CYAN}{}:{RESET}\n", service.name));
        if let Some(image) = &service.image {
            out.push_str(&format!("      Image: {image}\n"));
        }
        push_list(&mut out, "Ports", &service.ports, 0);
        push_list(&mut out, "Environment", &service.environment, service.more_environment);
        push_list(&mut out, "Volumes", &service.volumes, service.more_volumes);
    }
    if !summary.networks.is_empty() {
        out.push_str(&format!("\n  {BOLD}Networks{RESET}\n"));
        for network in &summary.networks {
            out.push_str(&format!("    - {network}\n"));
        }
    }
    if !summary.volumes.is_empty() {
        out.push_str(&format!("\n  {BOLD}Volumes{RESET}\n"));
        for volume in &summary.volumes {
            out.push_str(&format!("    - {volume}\n"));
        }
    }
    out.push('\n');
    out
}

fn push_list(out: &mut String, label: &str, items: &[String], more: usize) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("      {label}:\n"));
    for item in items {
        out.push_str(&format!("        - {item}\n"));
    }
    if more > 0 {
        out.push_str(&format!("        ... and {more} more\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_truncates_environment() {
        let file = ComposeFile::parse(
            "services:\n  app:\n    image: app:1\n    environment:\n      - A=1\n      - B=2\n      - C=3\n      - D=4\n      - E=5\n      - F=6\n      - G=7\nvolumes:\n  data:\n",
        )
        .expect("parse");
        let text = render(&summarize(&file));
        assert!(text.contains("Image: app:1"));
        assert!(text.contains("- E=5"));
        assert!(!text.contains("- F=6"));
        assert!(text.contains("... and 2 more"));
        assert!(text.contains("    - data\n"));
    }

    #[test]
    fn render_skips_absent_sections() {
        let file = ComposeFile::parse("services:\n  app:\n    image: app:1\n").expect("parse");
        let text = render(&summarize(&file));
        assert!(!text.contains("Ports:"));
        assert!(!text.contains("Networks"));
    }
}
