//! Dashboard variables

use super::{Component, ComponentKind, ComponentMap, ComponentSet};
use crate::merge::{Merge, merge_option, merge_string};
use serde::{Deserialize, Serialize};

/// Where a variable's values come from. Only `variableSourceType` is
/// always present; the other fields depend on the source type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceDefinition {
    pub variable_source_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub query: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filter: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub values: String,
}

impl Merge for SourceDefinition {
    fn merge_from(&mut self, other: &Self) {
        merge_string(&mut self.variable_source_type, &other.variable_source_type);
        merge_string(&mut self.query, &other.query);
        merge_string(&mut self.field, &other.field);
        merge_string(&mut self.filter, &other.filter);
        merge_string(&mut self.key, &other.key);
        merge_string(&mut self.values, &other.values);
    }
}

/// A dashboard variable, addressed by its `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Variable {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default_value: String,
    pub source_definition: SourceDefinition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_multi_select: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all_option: Option<bool>,
    #[serde(rename = "hideFromUI", skip_serializing_if = "Option::is_none")]
    pub hide_from_ui: Option<bool>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value_type: String,
}

impl Merge for Variable {
    fn merge_from(&mut self, other: &Self) {
        merge_string(&mut self.id, &other.id);
        merge_string(&mut self.name, &other.name);
        merge_string(&mut self.display_name, &other.display_name);
        merge_string(&mut self.default_value, &other.default_value);
        self.source_definition.merge_from(&other.source_definition);
        merge_option(&mut self.allow_multi_select, &other.allow_multi_select);
        merge_option(&mut self.include_all_option, &other.include_all_option);
        merge_option(&mut self.hide_from_ui, &other.hide_from_ui);
        merge_string(&mut self.value_type, &other.value_type);
    }
}

impl Component for Variable {
    const KIND: ComponentKind = ComponentKind::Variable;

    fn key(&self) -> &str {
        &self.name
    }

    fn set_key(&mut self, key: &str) {
        self.name = key.to_string();
    }

    fn collection(set: &ComponentSet) -> &ComponentMap<Self> {
        &set.variables
    }

    fn collection_mut(set: &mut ComponentSet) -> &mut ComponentMap<Self> {
        &mut set.variables
    }
}
