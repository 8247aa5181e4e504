//! Error types for sumo-core

use crate::model::ComponentKind;
use std::path::PathBuf;

/// Result type for sumo-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, building, diffing or importing
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A component file of an overlay could not be read or parsed
    #[error("Could not load {kind} definitions of overlay '{overlay}': {source}")]
    Load {
        overlay: String,
        kind: String,
        #[source]
        source: sumo_fs::Error,
    },

    /// The directory of a configured overlay does not exist
    #[error("Overlay '{name}' not found at {path}")]
    OverlayNotFound { name: String, path: PathBuf },

    /// An overlay name that is not part of the loaded chain
    #[error("Unknown overlay '{name}'")]
    UnknownOverlay { name: String },

    #[error("Dashboard '{dashboard}' references missing panel '{panel}'")]
    MissingPanel { panel: String, dashboard: String },

    #[error("Dashboard '{dashboard}' references missing variable '{variable}'")]
    MissingVariable { variable: String, dashboard: String },

    /// A folder lists a child that no overlay defines
    #[error("Unable to populate folder '{folder}': {kind} '{child}' does not exist")]
    MissingChild {
        kind: ComponentKind,
        child: String,
        folder: String,
    },

    #[error("Cyclic folder reference: {cycle}")]
    CyclicFolderReference { cycle: String },

    /// The top-level node of an exported artifact is not a folder
    #[error("Expected a {expected} at the root of the artifact, found {found}")]
    UnexpectedRootType { expected: String, found: String },

    #[error("Invalid artifact {path}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from sumo-fs
    #[error(transparent)]
    Fs(#[from] sumo_fs::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
