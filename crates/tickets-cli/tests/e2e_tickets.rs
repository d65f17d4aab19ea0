//! End-to-end CLI tests.
//!
//! Each test runs the `tickets` binary as a subprocess against an isolated
//! temp directory used as both the working directory and the config home.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the tickets binary, rooted in `dir`.
fn tickets_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tickets"));
    cmd.current_dir(dir);
    // Keep the user's real config and environment out of the run.
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd.env("HOME", dir);
    cmd.env_remove("FORMAT");
    cmd.env_remove("TICKETS_DATA_DIR");
    cmd.env("TICKETS_LOG", "error");
    cmd
}

fn store_path(dir: &Path) -> std::path::PathBuf {
    dir.join("data").join("tickets.json")
}

/// Create a ticket via the CLI and return its JSON.
fn create_ticket(dir: &Path, title: &str, priority: &str, tags: &str) -> Value {
    let output = tickets_cmd(dir)
        .args([
            "create",
            "--title",
            title,
            "--description",
            &format!("{title} details"),
            "--priority",
            priority,
            "--tags",
            tags,
            "--json",
        ])
        .output()
        .expect("create should not crash");
    assert!(
        output.status.success(),
        "create failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("create --json should produce valid JSON")
}

fn list_json(dir: &Path, extra: &[&str]) -> Vec<Value> {
    let output = tickets_cmd(dir)
        .arg("list")
        .args(extra)
        .arg("--json")
        .output()
        .expect("list should not crash");
    assert!(
        output.status.success(),
        "list failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    value.as_array().cloned().expect("list --json returns an array")
}

fn show_json(dir: &Path, id: &str) -> Value {
    let output = tickets_cmd(dir)
        .args(["show", id, "--json"])
        .output()
        .expect("show should not crash");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn create_list_show_update_roundtrip() {
    let dir = TempDir::new().unwrap();
    let created = create_ticket(dir.path(), "Fix bug", "high", "");
    let id = created["id"].as_str().unwrap().to_string();

    assert_eq!(created["title"], "Fix bug");
    assert_eq!(created["status"], "OPEN");
    assert_eq!(created["priority"], "HIGH");
    assert_eq!(created["tags"], serde_json::json!([]));
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let listed = list_json(dir.path(), &[]);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());

    tickets_cmd(dir.path())
        .args(["update", &id, "--status", "in_progress"])
        .assert()
        .success();

    let shown = show_json(dir.path(), &id);
    assert_eq!(shown["status"], "IN_PROGRESS");
    assert_eq!(shown["createdAt"], created["createdAt"]);
    assert_ne!(shown["updatedAt"], created["updatedAt"]);
}

#[test]
fn store_file_is_created_on_first_use() {
    let dir = TempDir::new().unwrap();
    assert!(!store_path(dir.path()).exists());

    tickets_cmd(dir.path())
        .args(["list", "--format", "pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tickets found."));

    let content = fs::read_to_string(store_path(dir.path())).unwrap();
    let parsed: Vec<Value> = serde_json::from_str(&content).unwrap();
    assert!(parsed.is_empty());
}

#[test]
fn pretty_create_output_lists_fields() {
    let dir = TempDir::new().unwrap();
    tickets_cmd(dir.path())
        .args([
            "create",
            "-t",
            "Login fails",
            "-d",
            "500 on submit",
            "-p",
            "Critical",
            "--tags",
            " auth, backend ,,",
            "--format",
            "pretty",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ticket created"))
        .stdout(predicate::str::contains("Priority:    CRITICAL"))
        .stdout(predicate::str::contains("Status:      OPEN"))
        .stdout(predicate::str::contains("Tags:        auth, backend"));
}

#[test]
fn list_filters_by_status_priority_and_tags() {
    let dir = TempDir::new().unwrap();
    let a = create_ticket(dir.path(), "A", "HIGH", "bug,ui");
    create_ticket(dir.path(), "B", "low", "docs");
    let c = create_ticket(dir.path(), "C", "high", "bug");

    let c_id = c["id"].as_str().unwrap();
    tickets_cmd(dir.path())
        .args(["update", c_id, "-s", "resolved"])
        .assert()
        .success();

    let high = list_json(dir.path(), &["--priority", "high"]);
    assert_eq!(high.len(), 2);

    let open_high = list_json(dir.path(), &["--status", "open", "--priority", "high"]);
    assert_eq!(open_high.len(), 1);
    assert_eq!(open_high[0]["id"], a["id"]);

    let docs_or_ui = list_json(dir.path(), &["--tags", "docs,ui"]);
    let titles: Vec<&str> = docs_or_ui
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["A", "B"]);
}

#[test]
fn text_list_is_tab_separated_with_header() {
    let dir = TempDir::new().unwrap();
    create_ticket(dir.path(), "Row", "medium", "x");

    tickets_cmd(dir.path())
        .args(["list", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id\tstatus\tpriority\ttitle\ttags\n"))
        .stdout(predicate::str::contains("\tOPEN\tMEDIUM\tRow\tx\n"));
}

#[test]
fn tag_untag_and_delete() {
    let dir = TempDir::new().unwrap();
    let created = create_ticket(dir.path(), "Taggable", "low", "one");
    let id = created["id"].as_str().unwrap();

    tickets_cmd(dir.path())
        .args(["tag", id, "two", "one", "three"])
        .assert()
        .success();
    assert_eq!(
        show_json(dir.path(), id)["tags"],
        serde_json::json!(["one", "two", "three"])
    );

    tickets_cmd(dir.path())
        .args(["untag", id, "one", "missing"])
        .assert()
        .success();
    assert_eq!(
        show_json(dir.path(), id)["tags"],
        serde_json::json!(["two", "three"])
    );

    tickets_cmd(dir.path())
        .args(["delete", id, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ok\": true"));
    assert!(list_json(dir.path(), &[]).is_empty());
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn invalid_priority_exits_1_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    tickets_cmd(dir.path())
        .args(["create", "-t", "x", "-d", "y", "-p", "urgent"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid priority: urgent"));

    assert!(!store_path(dir.path()).exists());
}

#[test]
fn invalid_status_on_update_quotes_input() {
    let dir = TempDir::new().unwrap();
    let created = create_ticket(dir.path(), "T", "low", "");
    let id = created["id"].as_str().unwrap();

    tickets_cmd(dir.path())
        .args(["update", id, "--status", "Done"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid status: Done"));
}

#[test]
fn too_long_title_is_rejected() {
    let dir = TempDir::new().unwrap();
    let title = "x".repeat(201);
    tickets_cmd(dir.path())
        .args(["create", "-t", &title, "-d", "y", "-p", "low"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Title cannot exceed 200 characters"));
}

#[test]
fn blank_description_is_rejected() {
    let dir = TempDir::new().unwrap();
    tickets_cmd(dir.path())
        .args(["create", "-t", "x", "-d", "   ", "-p", "low"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Description cannot be empty"));
}

#[test]
fn show_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    tickets_cmd(dir.path())
        .args(["show", "zzz"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Ticket with id zzz not found"));
}

#[test]
fn delete_unknown_id_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    create_ticket(dir.path(), "Keep", "low", "");
    let before = fs::read_to_string(store_path(dir.path())).unwrap();

    tickets_cmd(dir.path())
        .args(["delete", "zzz"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Ticket with id zzz not found"));

    assert_eq!(fs::read_to_string(store_path(dir.path())).unwrap(), before);
}

#[test]
fn json_errors_are_structured() {
    let dir = TempDir::new().unwrap();
    let output = tickets_cmd(dir.path())
        .args(["show", "zzz", "--json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: Value = serde_json::from_slice(&output.stderr).expect("stderr is JSON");
    assert_eq!(value["error"]["message"], "Ticket with id zzz not found");
    assert_eq!(value["error"]["error_code"], "E2001");
}

#[test]
fn corrupt_store_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(store_path(dir.path()), "not json").unwrap();

    tickets_cmd(dir.path())
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to parse"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn data_dir_flag_overrides_default() {
    let dir = TempDir::new().unwrap();
    tickets_cmd(dir.path())
        .args(["--data-dir", "elsewhere", "list"])
        .assert()
        .success();

    assert!(dir.path().join("elsewhere/tickets.json").exists());
    assert!(!store_path(dir.path()).exists());
}

#[test]
fn env_data_dir_is_honoured() {
    let dir = TempDir::new().unwrap();
    tickets_cmd(dir.path())
        .env("TICKETS_DATA_DIR", dir.path().join("from-env"))
        .arg("list")
        .assert()
        .success();

    assert!(dir.path().join("from-env/tickets.json").exists());
}

#[test]
fn project_config_sets_store_location() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".tickets")).unwrap();
    fs::write(
        dir.path().join(".tickets/config.toml"),
        "[storage]\ndata_dir = \"store\"\nfile_name = \"board.json\"\n",
    )
    .unwrap();

    create_ticket(dir.path(), "Configured", "low", "");

    assert!(dir.path().join("store/board.json").exists());
}

#[test]
fn broken_project_config_fails_with_config_code() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".tickets")).unwrap();
    fs::write(dir.path().join(".tickets/config.toml"), "[storage\n").unwrap();

    let output = tickets_cmd(dir.path())
        .args(["list", "--json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let value: Value = serde_json::from_slice(&output.stderr).expect("stderr is JSON");
    assert_eq!(value["error"]["error_code"], "E1001");
    assert_eq!(value["error"]["kind"], "Config file parse error");
}

#[test]
fn format_env_selects_json() {
    let dir = TempDir::new().unwrap();
    let output = tickets_cmd(dir.path())
        .env("FORMAT", "json")
        .arg("list")
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value, serde_json::json!([]));
}

#[test]
fn completions_generate_script() {
    let dir = TempDir::new().unwrap();
    tickets_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tickets"));
}

#[test]
fn missing_required_flag_exits_one() {
    let dir = TempDir::new().unwrap();
    tickets_cmd(dir.path())
        .args(["create", "--title", "Fix bug", "--description", "App crashes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--priority"));
    assert!(!store_path(dir.path()).exists());
}

#[test]
fn help_exits_zero() {
    let dir = TempDir::new().unwrap();
    tickets_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"));
}
