//! Filesystem layer for the Sumo Logic application builder
//!
//! Provides normalized path handling, format-agnostic loading and saving of
//! component definition files, and atomic writes.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use path::NormalizedPath;
