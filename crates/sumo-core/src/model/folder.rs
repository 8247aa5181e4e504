//! Folders, the application root and composed children

use super::dashboard::Dashboard;
use super::search::SavedSearch;
use super::{Component, ComponentKind, ComponentMap, ComponentSet};
use crate::merge::{Merge, merge_string, merge_vec};
use serde::{Deserialize, Serialize};

/// Ordered child names of a folder, by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Items {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub folders: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dashboards: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub saved_searches: Vec<String>,
}

impl Items {
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.dashboards.is_empty() && self.saved_searches.is_empty()
    }
}

impl Merge for Items {
    fn merge_from(&mut self, other: &Self) {
        merge_vec(&mut self.folders, &other.folders);
        merge_vec(&mut self.dashboards, &other.dashboards);
        merge_vec(&mut self.saved_searches, &other.saved_searches);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Folder {
    #[serde(skip)]
    pub key: String,
    /// Assigned by the remote platform; never set by hand.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Items::is_empty")]
    pub items: Items,
    /// Populated by the builder.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Child>,
}

impl Merge for Folder {
    fn merge_from(&mut self, other: &Self) {
        merge_string(&mut self.key, &other.key);
        merge_string(&mut self.id, &other.id);
        merge_string(&mut self.name, &other.name);
        merge_string(&mut self.description, &other.description);
        self.items.merge_from(&other.items);
    }
}

impl Component for Folder {
    const KIND: ComponentKind = ComponentKind::Folder;
    const DERIVED_FIELDS: &'static [&'static str] = &["children"];

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: &str) {
        self.key = key.to_string();
    }

    fn collection(set: &ComponentSet) -> &ComponentMap<Self> {
        &set.folders
    }

    fn collection_mut(set: &mut ComponentSet) -> &mut ComponentMap<Self> {
        &mut set.folders
    }
}

/// The `init` definition of an overlay: application metadata and the
/// top-level entries of the folder tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RootFolder {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    pub items: Items,
}

impl Merge for RootFolder {
    fn merge_from(&mut self, other: &Self) {
        merge_string(&mut self.name, &other.name);
        merge_string(&mut self.description, &other.description);
        merge_string(&mut self.version, &other.version);
        self.items.merge_from(&other.items);
    }
}

/// A composed node of a built application tree.
///
/// Encoded with the `type` discriminator the remote platform uses for
/// content import and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Child {
    #[serde(rename = "FolderSyncDefinition")]
    Folder(Folder),
    #[serde(rename = "DashboardV2SyncDefinition")]
    Dashboard(Dashboard),
    #[serde(rename = "SavedSearchWithScheduleSyncDefinition")]
    SavedSearch(SavedSearch),
}

impl Child {
    pub fn name(&self) -> &str {
        match self {
            Child::Folder(folder) => &folder.name,
            Child::Dashboard(dashboard) => &dashboard.name,
            Child::SavedSearch(search) => &search.name,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Child::Folder(_) => "FolderSyncDefinition",
            Child::Dashboard(_) => "DashboardV2SyncDefinition",
            Child::SavedSearch(_) => "SavedSearchWithScheduleSyncDefinition",
        }
    }
}
