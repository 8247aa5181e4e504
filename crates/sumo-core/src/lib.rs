//! Layered overlay resolution, build and diff engine for Sumo Logic
//! applications
//!
//! An application is authored as many small component files spread over an
//! ordered chain of overlays (for example `base`, `middle`, `final`). This
//! crate:
//!
//! - **Loads** each overlay through a [`ComponentStore`] and merges every
//!   component over the definition inherited from the previous overlay
//! - **Builds** a resolved overlay into one self-contained folder tree,
//!   failing on any dangling reference
//! - **Diffs** two resolved component sets into a classified changelog
//! - **Imports** an exported artifact back into per-component files
//!
//! ```text
//!   base ──> middle ──> final        (each resolved over its parent)
//!                         │
//!                      builder ──> artifact JSON
//! ```
//!
//! # Example
//!
//! ```no_run
//! use sumo_core::{Application, FsComponentStore, Result};
//! use sumo_fs::NormalizedPath;
//!
//! fn compile() -> Result<String> {
//!     let store = FsComponentStore::new();
//!     let mut app = Application::load(&store, NormalizedPath::new("."), &["base", "final"])?;
//!     app.build(None)?;
//!     app.to_json()
//! }
//! ```

pub mod application;
pub mod builder;
pub mod diff;
pub mod error;
pub mod import;
pub mod loader;
pub mod merge;
pub mod model;
pub mod overlay;
pub mod store;

pub use application::Application;
pub use builder::build;
pub use diff::{Change, ChangeGroup, ChangeKind, ChangeSet};
pub use error::{Error, Result};
pub use import::{decompose, import_artifact, parse_artifact, sanitize_name};
pub use loader::{Loader, resolve};
pub use merge::{Merge, merge};
pub use model::{
    Child, Component, ComponentKind, ComponentMap, ComponentSet, Dashboard, Folder, Items, Panel,
    RootFolder, SavedSearch, Variable,
};
pub use overlay::{Overlay, OverlayChain};
pub use store::{ComponentStore, FsComponentStore};
