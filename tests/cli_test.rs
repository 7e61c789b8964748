//! End-to-end tests of the etlr binary

use std::fs;

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

use etlr::exitcode::FAILURE;

/// Binary isolated from the user's config and environment.
fn etlr(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("etlr").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("ETLR_API_KEY")
        .env_remove("ETLR_BASE_URL")
        .env_remove("ETLR_TIMEOUT_SECS")
        .env_remove("ETLR_STAGE");
    cmd
}

#[test]
fn given_help_flag_when_running_then_lists_commands() {
    let home = TempDir::new().unwrap();

    etlr(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("get-version"))
        .stdout(predicate::str::contains("restore"));
}

#[test]
fn given_no_identifier_when_getting_then_exits_one() {
    let home = TempDir::new().unwrap();

    etlr(&home)
        .arg("get")
        .assert()
        .code(FAILURE)
        .stderr(predicate::str::contains(
            "Error: Must provide either --id or both --name and --stage",
        ));
}

#[test]
fn given_no_api_key_when_listing_then_explains_how_to_set_it() {
    let home = TempDir::new().unwrap();

    etlr(&home)
        .arg("list")
        .assert()
        .code(FAILURE)
        .stderr(predicate::str::contains("ETLR_API_KEY"));
}

#[test]
fn given_yes_flag_when_deleting_then_request_sent_and_success_printed() {
    // Arrange
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/")
        .match_header("x-api-key", "cli-key")
        .match_body(Matcher::Json(json!({"action": "delete", "workflow_id": "abc"})))
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create();

    // Act & Assert
    etlr(&home)
        .env("ETLR_BASE_URL", server.url())
        .args(["delete", "--id", "abc", "--yes", "--api-key", "cli-key"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Workflow deleted"))
        .stdout(predicate::str::contains("\"success\": true"));
    mock.assert();
}

#[test]
fn given_api_error_when_getting_then_status_code_reported() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/")
        .with_status(404)
        .with_body(r#"{"error": "Workflow not found"}"#)
        .create();

    etlr(&home)
        .env("ETLR_BASE_URL", server.url())
        .env("ETLR_API_KEY", "env-key")
        .args(["get", "--name", "wf", "--stage", "prod"])
        .assert()
        .code(FAILURE)
        .stderr(predicate::str::contains("Error: Workflow not found"))
        .stderr(predicate::str::contains("Status Code: 404"));
}

#[test]
fn given_missing_env_when_deploying_default_file_then_nothing_sent() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("workflow.yaml"),
        "workflow:\n  name: wf\n  environment:\n    - ETLR_TEST_UNSET_VAR\n",
    )
    .unwrap();
    let mut server = Server::new();
    let mock = server.mock("POST", "/").expect(0).create();

    etlr(&home)
        .env("ETLR_BASE_URL", server.url())
        .env("ETLR_API_KEY", "env-key")
        .env_remove("ETLR_TEST_UNSET_VAR")
        .arg("deploy")
        .assert()
        .code(FAILURE)
        .stderr(predicate::str::contains(
            "Missing required environment variables: ETLR_TEST_UNSET_VAR",
        ))
        .stderr(predicate::str::contains("-e ETLR_TEST_UNSET_VAR=value"));
    mock.assert();
}

#[test]
fn given_workflow_file_when_deploying_then_pushes_and_starts() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("flow.yaml"),
        "workflow:\n  name: wf\n  stage: dev\n",
    )
    .unwrap();
    let mut server = Server::new();
    let upsert = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"action": "upsert", "stage": "prod"})))
        .with_status(200)
        .with_body(r#"{"created": true, "workflow": {"id": "id-1", "name": "wf", "stage": "prod"}}"#)
        .create();
    let deploy = server
        .mock("POST", "/")
        .match_body(Matcher::Json(json!({"action": "deploy", "workflow_id": "id-1"})))
        .with_status(200)
        .with_body(r#"{"status": "running"}"#)
        .create();

    etlr(&home)
        .env("ETLR_BASE_URL", server.url())
        .env("ETLR_API_KEY", "env-key")
        .env("ETLR_STAGE", "prod")
        .args(["deploy", "flow.yaml", "-e", "EXTRA=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EXTRA: 1"))
        .stdout(predicate::str::contains("Pushing workflow (stage override: prod)..."))
        .stdout(predicate::str::contains("✓ Workflow created"))
        .stdout(predicate::str::contains("Deploying workflow wf/prod..."))
        .stdout(predicate::str::contains("✓ Workflow deployed and running"));
    upsert.assert();
    deploy.assert();
}

#[test]
fn given_completion_command_when_running_then_no_api_key_needed() {
    let home = TempDir::new().unwrap();

    etlr(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("etlr"));
}
