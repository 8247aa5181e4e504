//! Integration tests for the sumo CLI binary.
//!
//! These tests exercise the actual compiled binary using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use sumo_test_utils::TestApp;

/// Get a Command for the sumo binary, isolated from the user's config.
fn sumo_cmd(app: &TestApp) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sumo"));
    cmd.current_dir(app.root())
        .env("HOME", app.root())
        .env_remove("SUMO_CONFIG")
        .env_remove("SUMO_OVERLAYS")
        .env_remove("SUMO_ACCESS_ID")
        .env_remove("SUMO_ACCESS_KEY")
        .env_remove("SUMO_DEPLOYMENT")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn fixture() -> TestApp {
    let app = TestApp::new();
    app.variable("base", "v1", "displayName: Region\ndefaultValue: x")
        .panel("base", "p1", "title: CPU\npanelType: SumoSearchPanel")
        .dashboard(
            "base",
            "overview",
            "name: Overview\ntitle: Overview\nlayout:\n  layoutType: Grid\n  layoutStructures:\n    - key: p1\n      structure: '{}'\nincludeVariables: [v1]",
        )
        .root_definition("base", "name: Demo\nitems:\n  dashboards: [overview]\n")
        .variable("final", "v1", "defaultValue: y");
    app
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_lists_commands() {
    let app = TestApp::new();
    sumo_cmd(&app)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("diff-overlays"))
        .stdout(predicate::str::contains("download-folder"));
}

#[test]
fn test_version_output() {
    let app = TestApp::new();
    sumo_cmd(&app)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sumo"));
}

// ============================================================================
// Build Tests
// ============================================================================

#[test]
fn test_build_prints_artifact() {
    let app = fixture();
    let output = sumo_cmd(&app)
        .args(["--overlays", "base,final", "build"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let artifact: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(artifact["name"], "Demo");
    let dashboard = &artifact["children"][0];
    assert_eq!(dashboard["type"], "DashboardV2SyncDefinition");
    assert_eq!(dashboard["variables"][0]["defaultValue"], "y");
}

#[test]
fn test_build_writes_output_file() {
    let app = fixture();
    sumo_cmd(&app)
        .args(["--overlays", "base,final", "build", "-o", "build.json"])
        .assert()
        .success();

    app.assert_file_contains("build.json", "\"FolderSyncDefinition\"");
}

#[test]
fn test_build_missing_panel_fails() {
    let app = fixture();
    app.dashboard(
        "final",
        "overview",
        "layout:\n  layoutStructures:\n    - key: p9\n      structure: '{}'",
    );

    sumo_cmd(&app)
        .args(["--overlays", "base,final", "build"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("p9"));
}

#[test]
fn test_default_chain_requires_all_overlays() {
    let app = fixture();
    sumo_cmd(&app)
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("middle"));
}

#[test]
fn test_overlays_from_config_file() {
    let app = fixture();
    app.write(".sumo-cli.yaml", "overlays: [base, final]\n");

    sumo_cmd(&app).arg("build").assert().success();
}

#[test]
fn test_overlays_from_environment() {
    let app = fixture();
    sumo_cmd(&app)
        .env("SUMO_OVERLAYS", "base,final")
        .arg("build")
        .assert()
        .success();
}

// ============================================================================
// Diff Tests
// ============================================================================

#[test]
fn test_diff_overlays_output() {
    let app = fixture();
    sumo_cmd(&app)
        .args(["--overlays", "base,final", "diff-overlays", "base", "final"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 changes"))
        .stdout(predicate::str::contains("In Variables v1 : 1 change(s)"))
        .stdout(predicate::str::contains("At defaultValue"));
}

#[test]
fn test_diff_overlays_json() {
    let app = fixture();
    let output = sumo_cmd(&app)
        .args(["--overlays", "base,final", "diff-overlays", "base", "final", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["count"], 1);
    assert_eq!(report["groups"][0]["category"], "Variables");
    assert_eq!(report["groups"][0]["changes"][0]["type"], "update");
    assert_eq!(report["groups"][0]["changes"][0]["to"], "y");
}

#[test]
fn test_diff_builds() {
    let app = fixture();
    sumo_cmd(&app)
        .args(["--overlays", "base,final", "build", "--overlay", "base", "-o", "a.json"])
        .assert()
        .success();
    sumo_cmd(&app)
        .args(["--overlays", "base,final", "build", "-o", "b.json"])
        .assert()
        .success();

    sumo_cmd(&app)
        .args(["diff-builds", "a.json", "b.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 changes"))
        .stdout(predicate::str::contains("=========== Variables ============"));
}

// ============================================================================
// Import and Debug Tests
// ============================================================================

#[test]
fn test_import_then_build_round_trip() {
    let app = fixture();
    sumo_cmd(&app)
        .args(["--overlays", "base,final", "build", "-o", "build.json"])
        .assert()
        .success();
    fs::create_dir_all(app.overlay_path("copy")).unwrap();

    sumo_cmd(&app)
        .args(["--overlays", "copy", "import", "build.json", "--overlay", "copy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported"));

    app.assert_file_exists("copy/dashboards/overview.yaml");
    app.assert_file_contains("copy/variables/v1.yaml", "defaultValue: y");

    sumo_cmd(&app)
        .args(["--overlays", "copy", "build", "-o", "copy.json"])
        .assert()
        .success();
    let original: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(app.root().join("build.json")).unwrap()).unwrap();
    let copy: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(app.root().join("copy.json")).unwrap()).unwrap();
    assert_eq!(original, copy);
}

#[test]
fn test_import_into_unknown_overlay_fails() {
    let app = fixture();
    app.write("export.json", r#"{"type": "FolderSyncDefinition", "name": "x"}"#);

    sumo_cmd(&app)
        .args(["--overlays", "base,final", "import", "export.json", "--overlay", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn test_debug_load_prints_resolved_yaml() {
    let app = fixture();
    sumo_cmd(&app)
        .args(["--overlays", "base,final", "debug", "load", "final", "variable", "v1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("displayName: Region"))
        .stdout(predicate::str::contains("defaultValue: y"));
}

#[test]
fn test_debug_load_missing_component() {
    let app = fixture();
    sumo_cmd(&app)
        .args(["--overlays", "base,final", "debug", "load", "final", "panel", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

// ============================================================================
// Remote Tests (no network: failures happen before any request)
// ============================================================================

#[test]
fn test_push_without_credentials_fails() {
    let app = fixture();
    app.write("build.json", r#"{"type": "FolderSyncDefinition", "name": "x", "children": []}"#);

    sumo_cmd(&app)
        .args(["push", "-d", "0000000000ABCDEF"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("credentials"));
}

#[test]
fn test_push_rejects_malformed_build() {
    let app = fixture();
    app.write("build.json", r#"{"type": "FolderSyncDefinition", "name": "#);

    sumo_cmd(&app)
        .args(["-i", "id", "-k", "key", "push", "build.json", "-d", "0000000000ABCDEF"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error near"));
}
