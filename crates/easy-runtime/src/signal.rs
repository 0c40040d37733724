//! Ctrl+C forwarding to the foreground child process.
//!
//! A process-wide handler is installed once. While an inherited-I/O child
//! is registered, an interrupt is forwarded to it as SIGINT and the runner
//! keeps waiting until the child exits, so it is never orphaned.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use easy_common::error::{EasyError, Result};

static HANDLER: OnceLock<std::result::Result<(), String>> = OnceLock::new();
static FOREGROUND: AtomicU32 = AtomicU32::new(0);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Installs the interrupt handler. Later calls are no-ops.
///
/// # Errors
///
/// Returns [`EasyError::Config`] if another handler is already installed.
pub fn install() -> Result<()> {
    HANDLER
        .get_or_init(|| ctrlc::set_handler(on_interrupt).map_err(|e| e.to_string()))
        .clone()
        .map_err(|message| EasyError::Config {
            message: format!("failed to set Ctrl+C handler: {message}"),
        })
}

/// Returns `true` if an interrupt arrived since the last [`take_interrupt`].
#[must_use]
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Clears and returns the interrupt flag.
pub fn take_interrupt() -> bool {
    INTERRUPTED.swap(false, Ordering::SeqCst)
}

/// Registers `pid` as the foreground child until the guard is dropped.
#[must_use]
pub fn register_foreground(pid: u32) -> ForegroundGuard {
    FOREGROUND.store(pid, Ordering::SeqCst);
    tracing::debug!(pid, "registered foreground child");
    ForegroundGuard { pid }
}

/// Keeps a child registered for interrupt forwarding.
#[derive(Debug)]
pub struct ForegroundGuard {
    pid: u32,
}

impl Drop for ForegroundGuard {
    fn drop(&mut self) {
        let _ = FOREGROUND.compare_exchange(self.pid, 0, Ordering::SeqCst, Ordering::SeqCst);
    }
}

fn on_interrupt() {
    INTERRUPTED.store(true, Ordering::SeqCst);
    let pid = FOREGROUND.load(Ordering::SeqCst);
    if pid != 0 {
        forward(pid);
    }
}

#[cfg(unix)]
fn forward(pid: u32) {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    if let Ok(raw) = i32::try_from(pid) {
        let _ = kill(Pid::from_raw(raw), Signal::SIGINT);
    }
}

// Windows consoles deliver Ctrl+C to every attached process already.
#[cfg(not(unix))]
const fn forward(_pid: u32) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_unregisters_only_its_own_pid() {
        let outer = register_foreground(4242);
        assert_eq!(FOREGROUND.load(Ordering::SeqCst), 4242);
        {
            let _inner = register_foreground(4343);
        }
        assert_eq!(FOREGROUND.load(Ordering::SeqCst), 0);
        drop(outer);
        assert_eq!(FOREGROUND.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn take_interrupt_clears_flag() {
        INTERRUPTED.store(true, Ordering::SeqCst);
        assert!(interrupted());
        assert!(take_interrupt());
        assert!(!interrupted());
    }
}
