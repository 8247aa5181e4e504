//! Wires resolved components into a self-contained application tree
//!
//! Dashboards get their panels and variables, folders get their children,
//! and the root items of the overlay become the top-level children of the
//! artifact. Every reference must resolve; nothing is silently dropped.

use crate::model::{
    Child, ComponentKind, ComponentMap, ComponentSet, Dashboard, Folder, Items, Panel,
    SavedSearch, Variable,
};
use crate::{Error, Result};

/// Owner name used when reporting references from the root items.
const ROOT_OWNER: &str = "root";

/// Build the components of one resolved overlay in place and return the
/// top-level children of the application.
///
/// Derived fields are reset before they are repopulated, so building the
/// same set twice yields the same tree.
pub fn build(components: &mut ComponentSet) -> Result<Vec<Child>> {
    let ComponentSet {
        variables,
        panels,
        dashboards,
        saved_searches,
        folders,
        root,
    } = components;

    for dashboard in dashboards.values_mut() {
        populate_dashboard(dashboard, panels, variables)?;
    }

    for folder in folders.values_mut() {
        folder.children.clear();
    }

    let mut resolver = FolderResolver {
        folders,
        dashboards,
        saved_searches,
        populated: ComponentMap::new(),
        ancestry: Vec::new(),
    };
    let children = resolver.children(&root.items, ROOT_OWNER)?;
    let populated = resolver.populated;

    for (key, folder) in populated {
        folders.insert(key, folder);
    }

    tracing::info!(
        dashboards = dashboards.len(),
        folders = folders.len(),
        children = children.len(),
        "Built application tree"
    );
    Ok(children)
}

/// Fill a dashboard's panels and variables from its layout and
/// `include_variables`, folding appended layout entries into the layout.
pub fn populate_dashboard(
    dashboard: &mut Dashboard,
    panels: &ComponentMap<Panel>,
    variables: &ComponentMap<Variable>,
) -> Result<()> {
    dashboard.panels.clear();
    dashboard.variables.clear();

    let appended = std::mem::take(&mut dashboard.layout.append_layout_structures);
    dashboard.layout.layout_structures.extend(appended);

    for entry in &dashboard.layout.layout_structures {
        let panel = panels.get(&entry.key).ok_or_else(|| Error::MissingPanel {
            panel: entry.key.clone(),
            dashboard: dashboard.key.clone(),
        })?;
        dashboard.panels.push(panel.clone());
    }

    for name in &dashboard.include_variables {
        let variable = variables.get(name).ok_or_else(|| Error::MissingVariable {
            variable: name.clone(),
            dashboard: dashboard.key.clone(),
        })?;
        dashboard.variables.push(variable.clone());
    }

    Ok(())
}

/// Check that every panel and variable `dashboard` references exists,
/// without populating it.
pub fn check_dashboard(
    dashboard: &Dashboard,
    panels: &ComponentMap<Panel>,
    variables: &ComponentMap<Variable>,
) -> Result<()> {
    let layout = &dashboard.layout;
    let mut entries = layout.layout_structures.iter().chain(&layout.append_layout_structures);
    if let Some(entry) = entries.find(|e| !panels.contains_key(&e.key)) {
        return Err(Error::MissingPanel {
            panel: entry.key.clone(),
            dashboard: dashboard.key.clone(),
        });
    }

    if let Some(name) = dashboard.include_variables.iter().find(|n| !variables.contains_key(*n)) {
        return Err(Error::MissingVariable {
            variable: name.clone(),
            dashboard: dashboard.key.clone(),
        });
    }

    Ok(())
}

struct FolderResolver<'a> {
    folders: &'a ComponentMap<Folder>,
    dashboards: &'a ComponentMap<Dashboard>,
    saved_searches: &'a ComponentMap<SavedSearch>,
    /// Folders already populated, so shared sub-folders are built once.
    populated: ComponentMap<Folder>,
    /// Folders currently being populated, outermost first.
    ancestry: Vec<String>,
}

impl FolderResolver<'_> {
    /// Children of `items`: folders, then dashboards, then saved searches.
    fn children(&mut self, items: &Items, owner: &str) -> Result<Vec<Child>> {
        let mut children = Vec::with_capacity(
            items.folders.len() + items.dashboards.len() + items.saved_searches.len(),
        );

        for name in &items.folders {
            children.push(Child::Folder(self.folder(name, owner)?));
        }

        for name in &items.dashboards {
            let dashboard = self.dashboards.get(name).ok_or_else(|| Error::MissingChild {
                kind: ComponentKind::Dashboard,
                child: name.clone(),
                folder: owner.into(),
            })?;
            children.push(Child::Dashboard(dashboard.clone()));
        }

        for name in &items.saved_searches {
            let search = self.saved_searches.get(name).ok_or_else(|| Error::MissingChild {
                kind: ComponentKind::SavedSearch,
                child: name.clone(),
                folder: owner.into(),
            })?;
            children.push(Child::SavedSearch(search.clone()));
        }

        Ok(children)
    }

    fn folder(&mut self, name: &str, owner: &str) -> Result<Folder> {
        if let Some(start) = self.ancestry.iter().position(|a| a == name) {
            let mut cycle = self.ancestry[start..].to_vec();
            cycle.push(name.to_string());
            return Err(Error::CyclicFolderReference {
                cycle: cycle.join(" -> "),
            });
        }

        if let Some(folder) = self.populated.get(name) {
            return Ok(folder.clone());
        }

        let definition = self.folders.get(name).ok_or_else(|| Error::MissingChild {
            kind: ComponentKind::Folder,
            child: name.into(),
            folder: owner.into(),
        })?;

        self.ancestry.push(name.to_string());
        let children = self.children(&definition.items, name);
        self.ancestry.pop();

        let mut folder = definition.clone();
        folder.children = children?;
        self.populated.insert(name.to_string(), folder.clone());
        Ok(folder)
    }
}
