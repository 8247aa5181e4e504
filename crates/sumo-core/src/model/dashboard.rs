//! Dashboards and their layout

use super::panel::Panel;
use super::timerange::TimeRange;
use super::variable::Variable;
use super::{Component, ComponentKind, ComponentMap, ComponentSet};
use crate::merge::{Merge, merge_map, merge_nested, merge_option, merge_string, merge_vec};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Position of one panel inside a dashboard layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutStructure {
    pub key: String,
    pub structure: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Layout {
    pub layout_type: String,
    pub layout_structures: Vec<LayoutStructure>,
    /// Entries added on top of an inherited layout; folded into
    /// `layout_structures` at build time.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub append_layout_structures: Vec<LayoutStructure>,
}

impl Layout {
    /// Every panel key referenced by the layout, primary entries first.
    pub fn panel_keys(&self) -> impl Iterator<Item = &str> {
        self.layout_structures
            .iter()
            .chain(&self.append_layout_structures)
            .map(|s| s.key.as_str())
    }
}

impl Merge for Layout {
    fn merge_from(&mut self, other: &Self) {
        merge_string(&mut self.layout_type, &other.layout_type);
        merge_vec(&mut self.layout_structures, &other.layout_structures);
        merge_vec(&mut self.append_layout_structures, &other.append_layout_structures);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelMap {
    pub data: BTreeMap<String, Value>,
}

impl LabelMap {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A dashboard definition.
///
/// `panels` and `variables` are empty in component files; the builder fills
/// them from `layout` and `include_variables`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dashboard {
    #[serde(skip)]
    pub key: String,
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub theme: String,
    #[serde(skip_serializing_if = "LabelMap::is_empty")]
    pub topology_label_map: LabelMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    pub layout: Layout,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub panels: Vec<Panel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Variable>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub root_panel: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_variables: Vec<String>,
}

impl Merge for Dashboard {
    fn merge_from(&mut self, other: &Self) {
        merge_string(&mut self.key, &other.key);
        merge_string(&mut self.name, &other.name);
        merge_string(&mut self.title, &other.title);
        merge_string(&mut self.description, &other.description);
        merge_string(&mut self.theme, &other.theme);
        merge_map(&mut self.topology_label_map.data, &other.topology_label_map.data);
        merge_option(&mut self.refresh_interval, &other.refresh_interval);
        merge_nested(&mut self.time_range, &other.time_range);
        self.layout.merge_from(&other.layout);
        merge_string(&mut self.root_panel, &other.root_panel);
        merge_vec(&mut self.include_variables, &other.include_variables);
        // panels/variables are rebuilt on every build
    }
}

impl Component for Dashboard {
    const KIND: ComponentKind = ComponentKind::Dashboard;
    const DERIVED_FIELDS: &'static [&'static str] = &["panels", "variables"];

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: &str) {
        self.key = key.to_string();
    }

    fn collection(set: &ComponentSet) -> &ComponentMap<Self> {
        &set.dashboards
    }

    fn collection_mut(set: &mut ComponentSet) -> &mut ComponentMap<Self> {
        &mut set.dashboards
    }
}
