//! Storage of component definitions
//!
//! Each overlay directory holds one sub-directory per component kind. Every
//! file in it is a mapping of component name to definition:
//!
//! ```text
//! <overlay>/
//!   init.yaml
//!   variables/*.yaml
//!   panels/*.yaml
//!   dashboards/*.yaml
//!   saved-searches/*.yaml
//!   folders/*.yaml
//! ```

use crate::model::{Component, ComponentMap, ComponentSet, RootFolder};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use sumo_fs::{ConfigFormat, ConfigStore, NormalizedPath, Result, io};

/// Candidate names of the root definition file, in lookup order.
pub const ROOT_FILES: [&str; 3] = ["init.yaml", "init.yml", "init.json"];

/// Reads and writes the raw component definitions of one overlay directory.
pub trait ComponentStore {
    /// All locally defined components of kind `T`, keyed by name.
    fn read<T: Component>(&self, overlay_dir: &NormalizedPath) -> Result<ComponentMap<T>>;

    /// The root definition, if the overlay has one.
    fn read_root(&self, overlay_dir: &NormalizedPath) -> Result<Option<RootFolder>>;

    fn write<T: Component>(
        &self,
        overlay_dir: &NormalizedPath,
        components: &ComponentMap<T>,
    ) -> Result<()>;

    fn write_root(&self, overlay_dir: &NormalizedPath, root: &RootFolder) -> Result<()>;

    /// Persist every component of `set` plus its root definition.
    fn write_set(&self, overlay_dir: &NormalizedPath, set: &ComponentSet) -> Result<()> {
        self.write(overlay_dir, &set.variables)?;
        self.write(overlay_dir, &set.panels)?;
        self.write(overlay_dir, &set.dashboards)?;
        self.write(overlay_dir, &set.saved_searches)?;
        self.write(overlay_dir, &set.folders)?;
        self.write_root(overlay_dir, &set.root)
    }
}

/// [`ComponentStore`] over YAML and JSON files.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsComponentStore {
    config: ConfigStore,
}

impl FsComponentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComponentStore for FsComponentStore {
    fn read<T: Component>(&self, overlay_dir: &NormalizedPath) -> Result<ComponentMap<T>> {
        let dir = overlay_dir.join(T::KIND.directory());
        let mut components = ComponentMap::new();
        if !dir.is_dir() {
            return Ok(components);
        }

        for file in io::list_files(&dir)? {
            if !is_component_file(&file) {
                tracing::debug!(path = %file.as_str(), "Skipping non-component file");
                continue;
            }

            let definitions: Option<BTreeMap<String, T>> = self.config.load(&file)?;
            for (key, mut component) in definitions.unwrap_or_default() {
                component.set_key(&key);
                match components.entry(key) {
                    Entry::Occupied(mut existing) => existing.get_mut().merge_from(&component),
                    Entry::Vacant(slot) => {
                        slot.insert(component);
                    }
                }
            }
        }

        Ok(components)
    }

    fn read_root(&self, overlay_dir: &NormalizedPath) -> Result<Option<RootFolder>> {
        for name in ROOT_FILES {
            let path = overlay_dir.join(name);
            if path.is_file() {
                let root: Option<RootFolder> = self.config.load(&path)?;
                return Ok(Some(root.unwrap_or_default()));
            }
        }
        Ok(None)
    }

    fn write<T: Component>(
        &self,
        overlay_dir: &NormalizedPath,
        components: &ComponentMap<T>,
    ) -> Result<()> {
        if components.is_empty() {
            return Ok(());
        }

        let dir = overlay_dir.join(T::KIND.directory());
        io::create_dir_all(&dir)?;
        // Keys that map to the same stem share one file
        let mut files: BTreeMap<String, BTreeMap<&str, &T>> = BTreeMap::new();
        for (key, component) in components {
            files
                .entry(file_stem(key))
                .or_default()
                .insert(key.as_str(), component);
        }

        for (stem, entries) in files {
            self.config.save(&dir.join(&format!("{stem}.yaml")), &entries)?;
        }

        Ok(())
    }

    fn write_root(&self, overlay_dir: &NormalizedPath, root: &RootFolder) -> Result<()> {
        self.config.save(&overlay_dir.join(ROOT_FILES[0]), root)
    }
}

/// File name stem for a component key. Path separators in free-text keys
/// must not turn into sub-directories.
fn file_stem(key: &str) -> String {
    key.replace(['/', '\\'], "_")
}

fn is_component_file(path: &NormalizedPath) -> bool {
    matches!(
        path.extension().and_then(ConfigFormat::from_extension),
        Some(ConfigFormat::Yaml | ConfigFormat::Json)
    )
}
