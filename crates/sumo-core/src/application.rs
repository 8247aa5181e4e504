//! The application aggregate
//!
//! Owns the overlay chain of one application directory and the tree built
//! from one of its overlays.

use crate::builder;
use crate::diff::ChangeSet;
use crate::loader::Loader;
use crate::model::{Child, Folder, Items};
use crate::overlay::{Overlay, OverlayChain};
use crate::store::ComponentStore;
use crate::{Error, Result};
use sumo_fs::NormalizedPath;

#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub name: String,
    pub description: String,
    pub version: String,
    /// Top-level entries of the built overlay.
    pub items: Items,
    /// Composed tree, filled by [`Application::build`].
    pub children: Vec<Child>,
    path: NormalizedPath,
    overlays: OverlayChain,
}

impl Application {
    /// Load the overlays `names` (most general first) below `path`.
    pub fn load<S: ComponentStore, N: AsRef<str>>(
        store: &S,
        path: NormalizedPath,
        names: &[N],
    ) -> Result<Self> {
        let overlays = Loader::new(store).load_chain(&path, names)?;
        Ok(Self::from_chain(path, overlays))
    }

    /// Wrap an already-resolved chain. Metadata comes from the most
    /// specific overlay, whose root carries the merged values of the chain.
    pub fn from_chain(path: NormalizedPath, overlays: OverlayChain) -> Self {
        let root = overlays
            .last()
            .map(|o| o.components.root.clone())
            .unwrap_or_default();

        Self {
            name: root.name,
            description: root.description,
            version: root.version,
            items: root.items,
            children: Vec::new(),
            path,
            overlays,
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn overlays(&self) -> &OverlayChain {
        &self.overlays
    }

    pub fn overlay(&self, name: &str) -> Result<&Overlay> {
        self.overlays.get(name)
    }

    /// Build the tree of `overlay`, or of the most specific overlay when
    /// none is given.
    pub fn build(&mut self, overlay: Option<&str>) -> Result<()> {
        let name = match overlay {
            Some(name) => name.to_string(),
            None => self
                .overlays
                .last()
                .map(|o| o.name.clone())
                .ok_or_else(|| Error::UnknownOverlay {
                    name: "<empty chain>".into(),
                })?,
        };

        let target = self.overlays.get_mut(&name)?;
        let children = builder::build(&mut target.components)?;
        let root = &target.components.root;

        self.name.clone_from(&root.name);
        self.description.clone_from(&root.description);
        self.version.clone_from(&root.version);
        self.items.clone_from(&root.items);
        self.children = children;

        tracing::info!(overlay = %name, children = self.children.len(), "Built application");
        Ok(())
    }

    /// The deployable artifact: a folder node holding the built tree.
    pub fn artifact(&self) -> Child {
        Child::Folder(Folder {
            name: self.name.clone(),
            description: self.description.clone(),
            children: self.children.clone(),
            ..Default::default()
        })
    }

    /// Pretty-printed JSON of [`Application::artifact`].
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.artifact())?)
    }

    /// Changes needed to go from overlay `from` to overlay `to`.
    pub fn diff_overlays(&self, from: &str, to: &str) -> Result<ChangeSet> {
        let from = self.overlay(from)?;
        let to = self.overlay(to)?;
        ChangeSet::compute(&from.components, &to.components)
    }
}
