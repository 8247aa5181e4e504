use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use sumo_fs::{ConfigFormat, ConfigStore, Error, NormalizedPath};
use tempfile::TempDir;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct TestPanel {
    title: String,
    panel_type: String,
}

#[rstest]
#[case("cpu.yaml", "cpu:\n  title: CPU\n  panelType: SumoSearchPanel\n")]
#[case("cpu.yml", "cpu:\n  title: CPU\n  panelType: SumoSearchPanel\n")]
#[case(
    "cpu.json",
    r#"{"cpu": {"title": "CPU", "panelType": "SumoSearchPanel"}}"#
)]
#[case("cpu.toml", "[cpu]\ntitle = \"CPU\"\npanelType = \"SumoSearchPanel\"\n")]
fn test_load_component_map_in_any_format(#[case] file_name: &str, #[case] content: &str) {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join(file_name);
    fs::write(&file_path, content).unwrap();

    let store = ConfigStore::new();
    let loaded: BTreeMap<String, TestPanel> = store.load(&NormalizedPath::new(&file_path)).unwrap();

    assert_eq!(
        loaded["cpu"],
        TestPanel {
            title: "CPU".into(),
            panel_type: "SumoSearchPanel".into(),
        }
    );
}

#[test]
fn test_save_then_load_yaml() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path()).join("panels/cpu.yaml");

    let mut panels = BTreeMap::new();
    panels.insert(
        "cpu".to_string(),
        TestPanel {
            title: "CPU".into(),
            panel_type: "SumoSearchPanel".into(),
        },
    );

    let store = ConfigStore::new();
    store.save(&path, &panels).unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert!(content.contains("panelType: SumoSearchPanel"));

    let loaded: BTreeMap<String, TestPanel> = store.load(&path).unwrap();
    assert_eq!(loaded, panels);
}

#[test]
fn test_malformed_yaml_reports_path_and_excerpt() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("broken.yaml");
    fs::write(&file_path, "cpu:\n  title: [unclosed\n").unwrap();

    let store = ConfigStore::new();
    let err = store
        .load::<BTreeMap<String, TestPanel>>(&NormalizedPath::new(&file_path))
        .unwrap_err();

    match err {
        Error::ConfigParse { path, format, .. } => {
            assert_eq!(path, file_path);
            assert_eq!(format, "YAML");
        }
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_not_found() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::new();
    let err = store
        .load::<TestPanel>(&NormalizedPath::new(temp.path()).join("init.yaml"))
        .unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn test_format_detection() {
    assert_eq!(ConfigFormat::from_extension("YML"), Some(ConfigFormat::Yaml));
    assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
    assert_eq!(ConfigFormat::from_extension("md"), None);
}
