//! Command implementations for sumo-cli

pub mod build;
pub mod debug;
pub mod diff;
pub mod import;
pub mod remote;

pub use build::run_build;
pub use debug::run_debug_load;
pub use diff::{run_diff_builds, run_diff_overlays};
pub use import::run_import;
pub use remote::{run_download_folder, run_push};
