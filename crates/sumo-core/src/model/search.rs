//! Saved searches

use super::{Component, ComponentKind, ComponentMap, ComponentSet};
use crate::merge::{Merge, merge_option, merge_string, merge_vec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Search {
    pub query_text: String,
    pub default_time_range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_receipt_time: Option<bool>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub view_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub view_start_time: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query_parameters: Vec<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parsing_mode: String,
}

impl Merge for Search {
    fn merge_from(&mut self, other: &Self) {
        merge_string(&mut self.query_text, &other.query_text);
        merge_string(&mut self.default_time_range, &other.default_time_range);
        merge_option(&mut self.by_receipt_time, &other.by_receipt_time);
        merge_string(&mut self.view_name, &other.view_name);
        merge_string(&mut self.view_start_time, &other.view_start_time);
        merge_vec(&mut self.query_parameters, &other.query_parameters);
        merge_string(&mut self.parsing_mode, &other.parsing_mode);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedSearch {
    #[serde(skip)]
    pub key: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub search: Search,
}

impl Merge for SavedSearch {
    fn merge_from(&mut self, other: &Self) {
        merge_string(&mut self.key, &other.key);
        merge_string(&mut self.name, &other.name);
        merge_string(&mut self.description, &other.description);
        self.search.merge_from(&other.search);
    }
}

impl Component for SavedSearch {
    const KIND: ComponentKind = ComponentKind::SavedSearch;

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: &str) {
        self.key = key.to_string();
    }

    fn collection(set: &ComponentSet) -> &ComponentMap<Self> {
        &set.saved_searches
    }

    fn collection_mut(set: &mut ComponentSet) -> &mut ComponentMap<Self> {
        &mut set.saved_searches
    }
}
