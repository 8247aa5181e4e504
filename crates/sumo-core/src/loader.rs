//! Overlay loading and resolution
//!
//! Each overlay is resolved against its already-resolved parent: the parent's
//! map of a kind seeds the overlay's map, and every local definition is
//! merged on top of the inherited definition of the same key.

use crate::builder::check_dashboard;
use crate::merge::merge;
use crate::model::{
    Component, ComponentKind, ComponentMap, ComponentSet, Dashboard, Folder, Panel, SavedSearch,
    Variable,
};
use crate::overlay::{Overlay, OverlayChain};
use crate::store::ComponentStore;
use crate::{Error, Result};
use sumo_fs::NormalizedPath;

/// Resolve the local definitions of one kind against the parent's resolved
/// map. Neither input is modified.
pub fn resolve<T: Component>(
    parent: Option<&ComponentMap<T>>,
    local: &ComponentMap<T>,
) -> ComponentMap<T> {
    let mut resolved = parent.cloned().unwrap_or_default();
    for (key, component) in local {
        let merged = match parent.and_then(|p| p.get(key)) {
            Some(inherited) => merge(inherited, component),
            None => component.clone(),
        };
        resolved.insert(key.clone(), merged);
    }
    resolved
}

/// Loads overlays through a [`ComponentStore`].
pub struct Loader<'a, S> {
    store: &'a S,
}

impl<'a, S: ComponentStore> Loader<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Load every overlay in `names` from `<root>/<name>`, in order.
    pub fn load_chain<N: AsRef<str>>(&self, root: &NormalizedPath, names: &[N]) -> Result<OverlayChain> {
        let mut chain = OverlayChain::new();
        for name in names {
            let name = name.as_ref();
            let parent = chain.last().map(|o| &o.components);
            let overlay = self.load_overlay(name, root.join(name), parent)?;
            chain.push(overlay);
        }
        Ok(chain)
    }

    /// Load a single overlay on top of an already-resolved parent.
    pub fn load_overlay(
        &self,
        name: &str,
        path: NormalizedPath,
        parent: Option<&ComponentSet>,
    ) -> Result<Overlay> {
        if !path.is_dir() {
            return Err(Error::OverlayNotFound {
                name: name.into(),
                path: path.to_native(),
            });
        }

        let mut overlay = Overlay::new(name, path);
        for kind in ComponentKind::LOAD_ORDER {
            match kind {
                ComponentKind::Variable => self.load_kind::<Variable>(&mut overlay, parent)?,
                ComponentKind::Panel => self.load_kind::<Panel>(&mut overlay, parent)?,
                ComponentKind::Dashboard => self.load_kind::<Dashboard>(&mut overlay, parent)?,
                ComponentKind::SavedSearch => self.load_kind::<SavedSearch>(&mut overlay, parent)?,
                ComponentKind::Folder => self.load_kind::<Folder>(&mut overlay, parent)?,
            }
        }

        // Dashboards may only use panels and variables resolved in this overlay
        let components = &overlay.components;
        for dashboard in components.dashboards.values() {
            check_dashboard(dashboard, &components.panels, &components.variables)?;
        }

        let local_root = self.store.read_root(&overlay.path).map_err(|source| Error::Load {
            overlay: name.into(),
            kind: "root".into(),
            source,
        })?;
        overlay.components.root = match (parent, local_root) {
            (Some(parent), Some(local)) => merge(&parent.root, &local),
            (Some(parent), None) => parent.root.clone(),
            (None, local) => local.unwrap_or_default(),
        };

        tracing::debug!(
            overlay = name,
            components = overlay.components.len(),
            "Loaded overlay"
        );
        Ok(overlay)
    }

    fn load_kind<T: Component>(&self, overlay: &mut Overlay, parent: Option<&ComponentSet>) -> Result<()> {
        let local = self.store.read::<T>(&overlay.path).map_err(|source| Error::Load {
            overlay: overlay.name.clone(),
            kind: T::KIND.directory().into(),
            source,
        })?;
        let resolved = resolve(parent.map(T::collection), &local);

        tracing::debug!(
            overlay = %overlay.name,
            kind = %T::KIND,
            local = local.len(),
            resolved = resolved.len(),
            "Resolved components"
        );
        *T::collection_mut(&mut overlay.components) = resolved;
        Ok(())
    }
}
