//! Formatted output helpers for CLI commands.
//!
//! Plain text with ANSI colors; tables are padded columns, not boxes.

use easy_common::error::EasyError;
use easy_runtime::{ContainerSummary, ProcessOutput};

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const RESET: &str = "\x1b[0m";

const RULE_WIDTH: usize = 60;
const SHORT_ID: usize = 12;

/// A dim horizontal rule.
#[must_use]
pub fn rule() -> String {
    format!("{DIM}{}{RESET}", "─".repeat(RULE_WIDTH))
}

/// Prints a top-level error, with the install hint on its own line for
/// missing binaries.
pub fn print_error(err: &anyhow::Error) {
    eprintln!();
    match err.downcast_ref::<EasyError>() {
        Some(EasyError::BinaryNotFound { binary, hint }) => {
            eprintln!("  {RED}Error:{RESET} {binary} is not installed or not in PATH.");
            eprintln!("  {DIM}{hint}{RESET}");
        }
        _ => {
            eprintln!("  {RED}Error:{RESET} {err}");
            for cause in err.chain().skip(1) {
                eprintln!("  {DIM}caused by: {cause}{RESET}");
            }
        }
    }
    eprintln!();
}

/// Prints the notice for a run the user interrupted. Returns `true` if so.
pub fn report_interrupt(out: &ProcessOutput) -> bool {
    if out.interrupted {
        eprintln!();
        eprintln!("  {YELLOW}Interrupted.{RESET} The child process has exited.");
    }
    out.interrupted
}

/// Renders `docker ps` rows as padded columns.
#[must_use]
pub fn container_table(containers: &[ContainerSummary]) -> String {
    let mut out = format!(
        "{:<14} {:<24} {:<28} {:<22} {}\n",
        "ID", "NAME", "IMAGE", "STATUS", "PORTS"
    );
    for c in containers {
        let id: String = c.id.chars().take(SHORT_ID).collect();
        let ports = if c.ports.is_empty() { "N/A" } else { c.ports.as_str() };
        out.push_str(&format!(
            "{id:<14} {:<24} {:<28} {:<22} {ports}\n",
            c.name, c.image, c.status
        ));
    }
    out
}

/// Numbered list, one entry per line.
#[must_use]
pub fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("  {}. {item}\n", i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(id: &str, ports: &str) -> ContainerSummary {
        ContainerSummary {
            id: id.into(),
            name: "redis".into(),
            image: "redis:7-alpine".into(),
            status: "Up 2 minutes".into(),
            ports: ports.into(),
        }
    }

    #[test]
    fn container_table_shortens_ids() {
        let table = container_table(&[container("0123456789abcdef", "6379/tcp")]);
        let row = table.lines().nth(1).expect("row");
        assert!(row.starts_with("0123456789ab "));
        assert!(!row.contains("cdef"));
        assert!(row.ends_with("6379/tcp"));
    }

    #[test]
    fn container_table_marks_missing_ports() {
        let table = container_table(&[container("abc", "")]);
        assert!(table.lines().nth(1).expect("row").ends_with("N/A"));
    }

    #[test]
    fn numbered_starts_at_one() {
        assert_eq!(numbered(&["a".into(), "b".into()]), "  1. a\n  2. b\n");
    }

    #[test]
    fn report_interrupt_only_for_interrupted_runs() {
        assert!(!report_interrupt(&ProcessOutput::default()));
        assert!(report_interrupt(&ProcessOutput {
            interrupted: true,
            ..ProcessOutput::default()
        }));
    }
}
