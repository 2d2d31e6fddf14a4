//! CLI integration tests for the deepsource-mcp binary.
//!
//! These run the compiled binary; server startup itself is not exercised
//! here because it would block on stdio.

use assert_cmd::Command;
use predicates::prelude::*;

fn server_cmd() -> Command {
    Command::cargo_bin("deepsource-mcp").expect("Failed to find deepsource-mcp binary")
}

#[test]
fn test_version_flag() {
    server_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("deepsource-mcp"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    server_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("DeepSource MCP server"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_missing_api_key_fails_fast() {
    server_cmd()
        .env_remove("DEEPSOURCE_API_KEY")
        .env("RUST_LOG", "error")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DEEPSOURCE_API_KEY"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    server_cmd().arg("--definitely-not-a-flag").assert().failure();
}
