//! Tests for building resolved overlays into an application tree

use pretty_assertions::assert_eq;
use sumo_core::{Application, Child, Error, FsComponentStore};
use sumo_fs::NormalizedPath;
use sumo_test_utils::TestApp;

fn fixture() -> TestApp {
    let app = TestApp::new();
    app.variable("base", "region", "displayName: Region\ndefaultValue: us")
        .panel("base", "cpu", "title: CPU\npanelType: SumoSearchPanel")
        .panel("base", "mem", "title: Memory\npanelType: SumoSearchPanel")
        .dashboard(
            "base",
            "overview",
            "name: Overview\ntitle: Overview\nlayout:\n  layoutType: Grid\n  layoutStructures:\n    - key: mem\n      structure: '{}'\n    - key: cpu\n      structure: '{}'\nincludeVariables: [region]",
        )
        .saved_search(
            "base",
            "errors",
            "name: Errors\nsearch:\n  queryText: error\n  defaultTimeRange: -15m",
        )
        .folder("base", "ops", "name: Ops\nitems:\n  dashboards: [overview]")
        .root_definition(
            "base",
            "name: Demo\ndescription: Demo app\nitems:\n  folders: [ops]\n  savedSearches: [errors]\n",
        )
        .overlay("final");
    app
}

fn load(app: &TestApp) -> Application {
    Application::load(
        &FsComponentStore::new(),
        NormalizedPath::new(app.root()),
        &["base", "final"],
    )
    .unwrap()
}

#[test]
fn builds_tree_in_declared_order() {
    let app = fixture();
    let mut application = load(&app);

    application.build(None).unwrap();

    assert_eq!(application.children.len(), 2);
    let Child::Folder(ops) = &application.children[0] else {
        panic!("expected the ops folder first");
    };
    assert_eq!(ops.name, "Ops");
    let Child::Dashboard(overview) = &ops.children[0] else {
        panic!("expected the overview dashboard");
    };
    let panels: Vec<_> = overview.panels.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(panels, vec!["mem", "cpu"]);
    assert_eq!(overview.variables[0].name, "region");
    assert!(matches!(&application.children[1], Child::SavedSearch(s) if s.name == "Errors"));
}

#[test]
fn missing_panel_names_panel_and_dashboard() {
    let app = fixture();
    app.dashboard(
        "final",
        "overview",
        "layout:\n  layoutStructures:\n    - key: disk\n      structure: '{}'",
    );
    let err = Application::load(
        &FsComponentStore::new(),
        NormalizedPath::new(app.root()),
        &["base", "final"],
    )
    .unwrap_err();

    assert!(matches!(
        err,
        Error::MissingPanel { panel, dashboard } if panel == "disk" && dashboard == "overview"
    ));
}

#[test]
fn missing_folder_child_is_named() {
    let app = fixture();
    app.folder("final", "ops", "items:\n  dashboards: [overview, d2]");
    let mut application = load(&app);

    let err = application.build(None).unwrap_err();

    assert!(matches!(
        &err,
        Error::MissingChild { child, folder, .. } if child == "d2" && folder == "ops"
    ));
    assert!(err.to_string().contains("d2"));
}

#[test]
fn cyclic_folders_are_rejected() {
    let app = fixture();
    app.folder("final", "ops", "items:\n  folders: [nested]")
        .folder("final", "nested", "name: Nested\nitems:\n  folders: [ops]");
    let mut application = load(&app);

    let err = application.build(None).unwrap_err();

    assert!(matches!(err, Error::CyclicFolderReference { cycle } if cycle == "ops -> nested -> ops"));
}

#[test]
fn building_twice_is_stable() {
    let app = fixture();
    app.dashboard(
        "final",
        "overview",
        "layout:\n  appendLayoutStructures:\n    - key: cpu\n      structure: '{}'",
    );
    let mut application = load(&app);

    application.build(None).unwrap();
    let first = application.to_json().unwrap();
    application.build(None).unwrap();
    let second = application.to_json().unwrap();

    assert_eq!(first, second);
    let overview = &application.overlay("final").unwrap().components.dashboards["overview"];
    assert_eq!(overview.panels.len(), 3);
    assert!(overview.layout.append_layout_structures.is_empty());
}

#[test]
fn appended_layout_does_not_touch_parent_overlay() {
    let app = fixture();
    app.dashboard(
        "final",
        "overview",
        "layout:\n  appendLayoutStructures:\n    - key: cpu\n      structure: '{}'",
    );
    let mut application = load(&app);

    application.build(None).unwrap();

    let base = &application.overlay("base").unwrap().components.dashboards["overview"];
    assert_eq!(base.layout.layout_structures.len(), 2);
    assert!(base.panels.is_empty());
}

#[test]
fn artifact_is_a_typed_folder() {
    let app = fixture();
    let mut application = load(&app);
    application.build(Some("base")).unwrap();

    let artifact: serde_json::Value = serde_json::from_str(&application.to_json().unwrap()).unwrap();

    assert_eq!(artifact["type"], "FolderSyncDefinition");
    assert_eq!(artifact["name"], "Demo");
    assert_eq!(artifact["children"][0]["type"], "FolderSyncDefinition");
    assert_eq!(artifact["children"][0]["children"][0]["type"], "DashboardV2SyncDefinition");
    assert_eq!(
        artifact["children"][1]["type"],
        "SavedSearchWithScheduleSyncDefinition"
    );
}

#[test]
fn unknown_overlay_cannot_be_built() {
    let app = fixture();
    let mut application = load(&app);

    let err = application.build(Some("staging")).unwrap_err();

    assert!(matches!(err, Error::UnknownOverlay { name } if name == "staging"));
}
