//! End-to-end tests for the eventmanager binary that need no server

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// The binary with config, data and session locations inside `dir`
fn eventmanager(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("eventmanager").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env("XDG_DATA_HOME", dir.path().join("data"))
        .env("HOME", dir.path())
        .env("EVENTMANAGER_SESSION_FILE", dir.path().join("session.json"))
        .env("EVENTMANAGER_API_URL", "http://127.0.0.1:9/api/")
        .env_remove("EVENTMANAGER_CONFIG")
        .env_remove("EVENTMANAGER_SERVER_HOST")
        .env_remove("EVENTMANAGER_SERVER_PORT")
        .env_remove("EVENTMANAGER_PASSWORD")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    eventmanager(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("events"))
        .stdout(predicate::str::contains("reminders"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    eventmanager(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_server_show_json_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[server]\nhost = \"10.0.2.2\"\nport = 9001\n").unwrap();

    eventmanager(&dir)
        .env_remove("EVENTMANAGER_API_URL")
        .args(["--format", "json", "--config"])
        .arg(&config)
        .args(["server", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"base_url\": \"http://10.0.2.2:9001/api/\""));
}

#[test]
fn test_server_set_and_reset_persist() {
    let dir = TempDir::new().unwrap();
    let saved = dir.path().join("config").join("eventmanager").join("config.toml");

    eventmanager(&dir)
        .env_remove("EVENTMANAGER_API_URL")
        .args(["server", "set", "--host", "192.168.1.20", "--port", "8080"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://192.168.1.20:8080/api/"));

    let content = fs::read_to_string(&saved).unwrap();
    assert!(content.contains("port = 8080"));
    assert!(content.contains("192.168.1.20"));
    assert!(!content.contains("session.json"));

    eventmanager(&dir)
        .env_remove("EVENTMANAGER_API_URL")
        .args(["server", "reset"])
        .assert()
        .success();
    let content = fs::read_to_string(&saved).unwrap();
    assert!(content.contains("port = 8000"));
}

#[test]
fn test_server_set_needs_a_change() {
    let dir = TempDir::new().unwrap();
    eventmanager(&dir)
        .args(["server", "set"])
        .assert()
        .code(2);
}

#[test]
fn test_invalid_config_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[server]\nscheme = \"ftp\"\n").unwrap();

    eventmanager(&dir)
        .env_remove("EVENTMANAGER_API_URL")
        .arg("--config")
        .arg(&config)
        .args(["server", "show"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("server.scheme"));
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    eventmanager(&dir)
        .args(["--config", "nope.toml", "server", "show"])
        .assert()
        .code(3);
}

#[test]
fn test_events_require_login() {
    let dir = TempDir::new().unwrap();
    eventmanager(&dir)
        .args(["events", "list"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_unknown_category_is_a_validation_error() {
    let dir = TempDir::new().unwrap();
    eventmanager(&dir)
        .args(["events", "list", "--category", "music"])
        .assert()
        .code(2);
}

#[test]
fn test_login_validates_before_connecting() {
    let dir = TempDir::new().unwrap();
    eventmanager(&dir)
        .args(["auth", "login", "--email", "not-an-email", "--password", "secret1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("email"));
}

#[test]
fn test_login_without_password_off_terminal() {
    let dir = TempDir::new().unwrap();
    eventmanager(&dir)
        .args(["auth", "login", "--email", "ali@uni.edu"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--password"));
}

#[test]
fn test_logout_without_session() {
    let dir = TempDir::new().unwrap();
    eventmanager(&dir)
        .args(["auth", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_delete_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    eventmanager(&dir)
        .args(["events", "delete", "3"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_update_needs_a_field() {
    let dir = TempDir::new().unwrap();
    eventmanager(&dir)
        .args(["events", "update", "3"])
        .assert()
        .code(2);
}

#[test]
fn test_unreachable_server_fails() {
    let dir = TempDir::new().unwrap();
    eventmanager(&dir)
        .env("EVENTMANAGER_TIMEOUT_SECS", "2")
        .args(["auth", "forgot-password", "--email", "ali@uni.edu"])
        .assert()
        .code(1);
}

#[test]
fn test_no_session_ignores_saved_login() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    fs::write(
        &session,
        r#"{
  "access_token": "access-1",
  "refresh_token": "refresh-1",
  "user": { "id": 3, "email": "sara@uni.edu", "name": "Sara", "role": "student" },
  "logged_in_at": "2025-12-01T09:00:00Z"
}"#,
    )
    .unwrap();

    eventmanager(&dir)
        .args(["--no-session", "registrations"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("Not logged in"));

    eventmanager(&dir)
        .args(["--no-session", "auth", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
    assert!(session.exists());
}
