use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("scout-admin").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Fitness Scout admin dashboard"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("approvals"))
        .stdout(predicate::str::contains("plans"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("scout-admin").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("scout-admin").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_scout-admin"));
}

#[test]
fn test_protected_command_without_session_is_redirected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let mut cmd = Command::cargo_bin("scout-admin").unwrap();
    cmd.env("SCOUT_ADMIN_CONFIG", &config).arg("users");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Redirected to /login"));
}

#[test]
fn test_logout_without_session() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let mut cmd = Command::cargo_bin("scout-admin").unwrap();
    cmd.env("SCOUT_ADMIN_CONFIG", &config).arg("logout");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("You are not logged in."));
}
