//! Decomposition of exported artifacts into components
//!
//! An exported artifact is one nested JSON document whose root is a folder.
//! Decomposing it walks the child tree, gives every folder, dashboard and
//! saved search a sanitized key and records it in its parent's items.
//! Panels and variables embedded in dashboards become components of their
//! own.

use crate::model::{Child, Component, ComponentSet, Folder, Items, RootFolder, TimeRange};
use crate::store::ComponentStore;
use crate::{Error, Result};
use serde_json::Value;
use sumo_fs::{ConfigFormat, ConfigStore, NormalizedPath, io};

const FOLDER_TYPE: &str = "FolderSyncDefinition";

/// Turn a display name into a component key.
///
/// `/` becomes `_`, `;` and spaces become `-`, and the result is lower-cased.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' => '_',
            ';' | ' ' => '-',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}

/// Parse the root folder of an exported artifact.
pub fn parse_artifact(content: &str, origin: &NormalizedPath) -> Result<Folder> {
    let value: Value = ConfigStore::new().parse(content, ConfigFormat::Json, origin)?;

    match value.get("type").and_then(Value::as_str) {
        None | Some(FOLDER_TYPE) => {}
        Some(found) => {
            return Err(Error::UnexpectedRootType {
                expected: FOLDER_TYPE.into(),
                found: found.into(),
            });
        }
    }

    serde_json::from_value(value).map_err(|source| Error::Artifact {
        path: origin.to_native(),
        source,
    })
}

/// Split an artifact's folder tree into a component set.
///
/// The root folder's name and description become the overlay root, its
/// children the root items.
pub fn decompose(mut root: Folder) -> ComponentSet {
    let mut set = ComponentSet::default();
    let children = std::mem::take(&mut root.children);
    let items = lift_children(children, &mut set);

    set.root = RootFolder {
        name: root.name,
        description: root.description,
        version: String::new(),
        items,
    };
    set
}

/// Read an artifact file and write its components into `overlay_dir`.
pub fn import_artifact<S: ComponentStore>(
    store: &S,
    artifact: &NormalizedPath,
    overlay_dir: &NormalizedPath,
) -> Result<ComponentSet> {
    let content = io::read_text(artifact)?;
    let set = decompose(parse_artifact(&content, artifact)?);
    store.write_set(overlay_dir, &set)?;

    tracing::info!(
        artifact = %artifact.as_str(),
        overlay = %overlay_dir.as_str(),
        components = set.len(),
        "Imported artifact"
    );
    Ok(set)
}

fn lift_children(children: Vec<Child>, set: &mut ComponentSet) -> Items {
    let mut items = Items::default();

    for child in children {
        match child {
            Child::Folder(mut folder) => {
                let key = sanitize_name(&folder.name);
                let nested = std::mem::take(&mut folder.children);
                folder.items = lift_children(nested, set);
                folder.set_key(&key);
                insert_unique(set, folder);
                items.folders.push(key);
            }
            Child::Dashboard(mut dashboard) => {
                let key = sanitize_name(&dashboard.name);
                tidy_time_range(&mut dashboard.time_range);
                for mut panel in std::mem::take(&mut dashboard.panels) {
                    tidy_time_range(&mut panel.time_range);
                    insert_unique(set, panel);
                }
                let variables = std::mem::take(&mut dashboard.variables);
                if !variables.is_empty() {
                    dashboard.include_variables = variables.iter().map(|v| v.name.clone()).collect();
                }
                for variable in variables {
                    insert_unique(set, variable);
                }
                dashboard.set_key(&key);
                insert_unique(set, dashboard);
                items.dashboards.push(key);
            }
            Child::SavedSearch(mut search) => {
                let key = sanitize_name(&search.name);
                search.set_key(&key);
                insert_unique(set, search);
                items.saved_searches.push(key);
            }
        }
    }

    items
}

/// Exports spell out boundaries nobody set; keep component files minimal.
fn tidy_time_range(range: &mut Option<TimeRange>) {
    if let Some(inner) = range {
        inner.empty_to_none();
        if inner.is_empty() {
            *range = None;
        }
    }
}

/// Insert a component, warning when a different definition with the same
/// key was already lifted. The later definition wins.
fn insert_unique<T: Component>(set: &mut ComponentSet, component: T) {
    let key = component.key().to_string();
    if let Some(previous) = set.insert(component) {
        if set.get::<T>(&key) != Some(&previous) {
            tracing::warn!(kind = %T::KIND, key = %key, "Conflicting definitions share one key");
        }
    }
}
