//! Component model
//!
//! Typed records for the five component kinds plus the overlay root. Every
//! component lives in a [`ComponentMap`] keyed by its logical name, and the
//! maps of one overlay are grouped in a [`ComponentSet`].

mod dashboard;
mod folder;
mod panel;
mod search;
mod timerange;
mod variable;

pub use dashboard::{Dashboard, LabelMap, Layout, LayoutStructure};
pub use folder::{Child, Folder, Items, RootFolder};
pub use panel::{Panel, Query};
pub use search::{SavedSearch, Search};
pub use timerange::{TimeBoundary, TimeRange};
pub use variable::{SourceDefinition, Variable};

use crate::merge::Merge;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Components of one kind, keyed (and iterated) by name.
pub type ComponentMap<T> = BTreeMap<String, T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Variable,
    Panel,
    Dashboard,
    SavedSearch,
    Folder,
}

impl ComponentKind {
    /// Resolution order within an overlay. A kind may only reference kinds
    /// that precede it.
    pub const LOAD_ORDER: [ComponentKind; 5] = [
        ComponentKind::Variable,
        ComponentKind::Panel,
        ComponentKind::Dashboard,
        ComponentKind::SavedSearch,
        ComponentKind::Folder,
    ];

    /// Sub-directory of an overlay holding this kind's files.
    pub fn directory(&self) -> &'static str {
        match self {
            ComponentKind::Variable => "variables",
            ComponentKind::Panel => "panels",
            ComponentKind::Dashboard => "dashboards",
            ComponentKind::SavedSearch => "saved-searches",
            ComponentKind::Folder => "folders",
        }
    }

    /// Category label used in change reports.
    pub fn category(&self) -> &'static str {
        match self {
            ComponentKind::Variable => "Variables",
            ComponentKind::Panel => "Panels",
            ComponentKind::Dashboard => "Dashboards",
            ComponentKind::SavedSearch => "SavedSearches",
            ComponentKind::Folder => "Folders",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Variable => "variable",
            ComponentKind::Panel => "panel",
            ComponentKind::Dashboard => "dashboard",
            ComponentKind::SavedSearch => "saved-search",
            ComponentKind::Folder => "folder",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "variable" | "variables" => Ok(ComponentKind::Variable),
            "panel" | "panels" => Ok(ComponentKind::Panel),
            "dashboard" | "dashboards" => Ok(ComponentKind::Dashboard),
            "saved-search" | "saved-searches" | "savedsearch" | "savedsearches" => {
                Ok(ComponentKind::SavedSearch)
            }
            "folder" | "folders" => Ok(ComponentKind::Folder),
            other => Err(format!(
                "unknown component kind '{other}' (expected variable, panel, dashboard, saved-search or folder)"
            )),
        }
    }
}

/// Behaviour shared by every component kind.
pub trait Component:
    Merge + Clone + Default + PartialEq + fmt::Debug + Serialize + DeserializeOwned
{
    const KIND: ComponentKind;

    /// Fields filled in at build time. They are excluded from merges and
    /// from change reports.
    const DERIVED_FIELDS: &'static [&'static str] = &[];

    fn key(&self) -> &str;

    /// Bind the component to the map key it was declared under.
    fn set_key(&mut self, key: &str);

    fn collection(set: &ComponentSet) -> &ComponentMap<Self>;

    fn collection_mut(set: &mut ComponentSet) -> &mut ComponentMap<Self>;
}

/// All components of one overlay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentSet {
    pub variables: ComponentMap<Variable>,
    pub panels: ComponentMap<Panel>,
    pub dashboards: ComponentMap<Dashboard>,
    pub saved_searches: ComponentMap<SavedSearch>,
    pub folders: ComponentMap<Folder>,
    pub root: RootFolder,
}

impl ComponentSet {
    pub fn get<T: Component>(&self, key: &str) -> Option<&T> {
        T::collection(self).get(key)
    }

    /// Insert a component under its own key.
    pub fn insert<T: Component>(&mut self, component: T) -> Option<T> {
        let key = component.key().to_string();
        T::collection_mut(self).insert(key, component)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
            + self.panels.len()
            + self.dashboards.len()
            + self.saved_searches.len()
            + self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("panel", ComponentKind::Panel)]
    #[case("Dashboards", ComponentKind::Dashboard)]
    #[case("saved-search", ComponentKind::SavedSearch)]
    #[case("savedSearches", ComponentKind::SavedSearch)]
    #[case("variable", ComponentKind::Variable)]
    #[case("folders", ComponentKind::Folder)]
    fn parses_kind_names(#[case] input: &str, #[case] expected: ComponentKind) {
        assert_eq!(input.parse::<ComponentKind>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "report".parse::<ComponentKind>().unwrap_err();
        assert!(err.contains("report"));
    }

    #[test]
    fn insert_uses_component_key() {
        let mut set = ComponentSet::default();
        let mut panel = Panel::default();
        panel.set_key("p1");
        set.insert(panel);

        assert!(set.get::<Panel>("p1").is_some());
        assert_eq!(set.len(), 1);
    }
}
