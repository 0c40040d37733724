//! End-to-end tests of the `easy` binary that need no container tooling.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::path::Path;
use std::process::{Command, Output};

fn easy(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_easy"))
        .arg("--home")
        .arg(home)
        .arg("--offline")
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run easy")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn download_offline_synthesizes_known_service() {
    let home = tempfile::tempdir().expect("tempdir");
    let out = easy(home.path(), &["download", "redis"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("template-synthesis"));

    let descriptor = std::fs::read_to_string(home.path().join("services/redis/docker-compose.yml"))
        .expect("descriptor");
    assert!(descriptor.contains("redis:7-alpine"));
    assert!(descriptor.contains("6379:6379"));

    let again = easy(home.path(), &["download", "redis"]);
    assert!(again.status.success());
    assert!(stdout(&again).contains("already installed"));
}

#[test]
fn list_shows_installed_services() {
    let home = tempfile::tempdir().expect("tempdir");
    let empty = easy(home.path(), &["list"]);
    assert!(empty.status.success());
    assert!(stdout(&empty).contains("No services installed"));

    assert!(easy(home.path(), &["download", "postgres"]).status.success());
    let listed = easy(home.path(), &["ls"]);
    assert!(stdout(&listed).contains("postgres"));
}

#[test]
fn show_prints_containers_and_volumes() {
    let home = tempfile::tempdir().expect("tempdir");
    assert!(easy(home.path(), &["download", "postgres"]).status.success());
    let out = easy(home.path(), &["show", "postgres"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("postgres:16-alpine"));
    assert!(text.contains("5432:5432"));
    assert!(text.contains("postgres_data"));
}

#[test]
fn show_missing_service_fails() {
    let home = tempfile::tempdir().expect("tempdir");
    let out = easy(home.path(), &["show", "redis"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not installed"));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let home = tempfile::tempdir().expect("tempdir");
    assert!(easy(home.path(), &["init", "shop", "-t", "mysql"]).status.success());
    let descriptor = std::fs::read_to_string(home.path().join("services/shop/docker-compose.yml"))
        .expect("descriptor");
    assert!(descriptor.contains("mysql:8"));

    assert!(!easy(home.path(), &["init", "shop"]).status.success());
    assert!(easy(home.path(), &["init", "shop", "--force", "-t", "webapp"]).status.success());
    let descriptor = std::fs::read_to_string(home.path().join("services/shop/docker-compose.yml"))
        .expect("descriptor");
    assert!(descriptor.contains("node:18-alpine"));
}

#[test]
fn init_rejects_path_traversal() {
    let home = tempfile::tempdir().expect("tempdir");
    let out = easy(home.path(), &["init", "../escape"]);
    assert!(!out.status.success());
    assert!(!home.path().join("escape").exists());
}

#[test]
fn config_set_then_show() {
    let home = tempfile::tempdir().expect("tempdir");
    assert!(easy(home.path(), &["download", "redis"]).status.success());
    assert!(easy(home.path(), &["config", "redis", "--set", "REDIS_PASSWORD=hunter2"]).status.success());

    let env = std::fs::read_to_string(home.path().join("services/redis/.env")).expect(".env");
    assert!(env.contains("REDIS_PASSWORD=hunter2"));

    let out = easy(home.path(), &["config", "redis", "--show"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Value: hunter2"));
}

#[test]
fn config_reset_without_sample_fails() {
    let home = tempfile::tempdir().expect("tempdir");
    assert!(easy(home.path(), &["download", "redis"]).status.success());
    assert!(!easy(home.path(), &["config", "redis", "--reset"]).status.success());
}

#[test]
fn update_keeps_backup() {
    let home = tempfile::tempdir().expect("tempdir");
    assert!(easy(home.path(), &["download", "nginx"]).status.success());
    let out = easy(home.path(), &["update", "nginx"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("Previous copy"));

    let backups: Vec<_> = std::fs::read_dir(home.path().join("backups"))
        .expect("backups dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("nginx-"));
}

#[test]
fn search_is_unavailable_offline() {
    let home = tempfile::tempdir().expect("tempdir");
    let out = easy(home.path(), &["search", "sql"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("--offline"));
}
