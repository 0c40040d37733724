//! Ctrl+C forwarding to an inherited-I/O child.
//!
//! Kept in its own test binary: the signal targets the whole process.

#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::thread;
use std::time::Duration;

use easy_runtime::{IoMode, Tool};
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;

const SCRIPT: &str = "trap 'echo int > \"$1\"; kill $! 2>/dev/null; exit 0' INT; sleep 10 & wait";

#[test]
fn interrupt_reaches_child_and_runner_waits_for_it() {
    let dir = tempfile::tempdir().expect("tempdir");
    let marker = dir.path().join("interrupted");
    let marker_arg = marker.to_string_lossy().into_owned();

    let raiser = thread::spawn(|| {
        thread::sleep(Duration::from_millis(700));
        kill(Pid::this(), Signal::SIGINT).expect("raise SIGINT");
    });

    let out = Tool::new("sh", "")
        .run(None, &["-c", SCRIPT, "sh", marker_arg.as_str()], IoMode::Inherited)
        .expect("interrupted run is not an error");
    raiser.join().expect("raiser thread");

    assert!(out.interrupted);
    assert_eq!(out.exit_code, 0);
    assert_eq!(
        std::fs::read_to_string(&marker).expect("child ran its INT trap").trim(),
        "int"
    );
}
