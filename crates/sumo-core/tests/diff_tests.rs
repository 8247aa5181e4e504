//! Tests for diffing overlays and builds

use pretty_assertions::assert_eq;
use serde_json::json;
use sumo_core::{
    Application, ChangeKind, ChangeSet, ComponentKind, FsComponentStore, decompose, parse_artifact,
};
use sumo_fs::NormalizedPath;
use sumo_test_utils::TestApp;

fn fixture() -> TestApp {
    let app = TestApp::new();
    app.variable("base", "v1", "displayName: Region\ndefaultValue: x")
        .panel("base", "p1", "title: CPU\npanelType: SumoSearchPanel")
        .dashboard(
            "base",
            "overview",
            "name: Overview\ntitle: Overview\nlayout:\n  layoutType: Grid\n  layoutStructures:\n    - key: p1\n      structure: '{}'\nincludeVariables: [v1]",
        )
        .root_definition("base", "name: Demo\nitems:\n  dashboards: [overview]\n");
    app
}

fn load(app: &TestApp, names: &[&str]) -> Application {
    Application::load(&FsComponentStore::new(), NormalizedPath::new(app.root()), names).unwrap()
}

#[test]
fn identical_overlays_have_no_changes() {
    let app = fixture();
    app.overlay("final");
    let application = load(&app, &["base", "final"]);

    let changes = application.diff_overlays("base", "final").unwrap();

    assert!(changes.is_empty());
    for category in sumo_core::diff::DIFF_ORDER {
        assert_eq!(changes.by_category(category).count(), 0);
    }
}

#[test]
fn added_panel_and_changed_default_value() {
    let app = fixture();
    app.variable("final", "v1", "defaultValue: y")
        .panel("final", "p2", "title: Memory");
    let application = load(&app, &["base", "final"]);

    let changes = application.diff_overlays("base", "final").unwrap();

    assert_eq!(changes.len(), 2);
    assert_eq!(changes.count(ComponentKind::Panel, ChangeKind::Create), 1);
    assert_eq!(changes.count(ComponentKind::Variable, ChangeKind::Update), 1);

    let update = changes.by_category(ComponentKind::Variable).next().unwrap();
    assert_eq!(update.key, "v1");
    assert_eq!(update.path, vec!["defaultValue"]);
    assert_eq!(update.from, Some(json!("x")));
    assert_eq!(update.to, Some(json!("y")));

    let create = changes.by_category(ComponentKind::Panel).next().unwrap();
    assert_eq!(create.key, "p2");
    assert!(create.from.is_none());
    assert_eq!(create.to.as_ref().unwrap()["title"], json!("Memory"));
}

#[test]
fn reverse_diff_deletes() {
    let app = fixture();
    app.panel("final", "p2", "title: Memory");
    let application = load(&app, &["base", "final"]);

    let changes = application.diff_overlays("final", "base").unwrap();

    assert_eq!(changes.count(ComponentKind::Panel, ChangeKind::Delete), 1);
}

#[test]
fn built_overlays_diff_like_unbuilt_ones() {
    let app = fixture();
    app.overlay("final");
    let mut application = load(&app, &["base", "final"]);

    application.build(Some("final")).unwrap();

    assert!(application.diff_overlays("base", "final").unwrap().is_empty());
}

#[test]
fn diff_of_builds_goes_through_decomposition() {
    let app = fixture();
    app.dashboard("final", "overview", "title: Production overview");
    let mut application = load(&app, &["base", "final"]);

    application.build(Some("base")).unwrap();
    let first = application.to_json().unwrap();
    application.build(Some("final")).unwrap();
    let second = application.to_json().unwrap();

    let origin = NormalizedPath::new("build.json");
    let old = decompose(parse_artifact(&first, &origin).unwrap());
    let new = decompose(parse_artifact(&second, &origin).unwrap());
    let changes = ChangeSet::compute(&old, &new).unwrap();

    assert_eq!(changes.len(), 1);
    let change = &changes.changes[0];
    assert_eq!(change.category, ComponentKind::Dashboard);
    assert_eq!(change.key, "overview");
    assert_eq!(change.path, vec!["title"]);
    assert_eq!(change.to, Some(json!("Production overview")));
}
