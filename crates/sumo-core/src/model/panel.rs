//! Panel components

use super::timerange::TimeRange;
use super::{Component, ComponentKind, ComponentMap, ComponentSet};
use crate::merge::{Merge, merge_nested, merge_option, merge_string, merge_vec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single query of a panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Query {
    pub query_string: String,
    pub query_type: String,
    pub query_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub metrics_query_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_query_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traces_query_data: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parse_mode: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub time_source: String,
}

/// A dashboard panel, addressed by its `key`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Panel {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub key: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub visual_settings: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_visual_settings_consistent_with_parent: Option<bool>,
    pub panel_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<Query>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coloring_rules: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub linked_dashboards: Vec<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
}

impl Merge for Panel {
    fn merge_from(&mut self, other: &Self) {
        merge_string(&mut self.id, &other.id);
        merge_string(&mut self.key, &other.key);
        merge_string(&mut self.title, &other.title);
        merge_string(&mut self.description, &other.description);
        merge_string(&mut self.visual_settings, &other.visual_settings);
        merge_option(
            &mut self.keep_visual_settings_consistent_with_parent,
            &other.keep_visual_settings_consistent_with_parent,
        );
        merge_string(&mut self.panel_type, &other.panel_type);
        merge_vec(&mut self.queries, &other.queries);
        merge_nested(&mut self.time_range, &other.time_range);
        merge_vec(&mut self.coloring_rules, &other.coloring_rules);
        merge_vec(&mut self.linked_dashboards, &other.linked_dashboards);
        merge_string(&mut self.text, &other.text);
    }
}

impl Component for Panel {
    const KIND: ComponentKind = ComponentKind::Panel;

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: &str) {
        self.key = key.to_string();
    }

    fn collection(set: &ComponentSet) -> &ComponentMap<Self> {
        &set.panels
    }

    fn collection_mut(set: &mut ComponentSet) -> &mut ComponentMap<Self> {
        &mut set.panels
    }
}
