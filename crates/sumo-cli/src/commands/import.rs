//! Import command implementation

use std::path::Path;

use colored::Colorize;
use sumo_core::import_artifact;
use sumo_fs::NormalizedPath;

use crate::context::Context;
use crate::error::Result;

/// Decompose an exported artifact into the components of `overlay`.
pub fn run_import(ctx: &Context, file: &Path, overlay: &str) -> Result<()> {
    let overlay_dir = ctx.overlay_dir(overlay)?;
    let set = import_artifact(&ctx.store, &NormalizedPath::new(file), &overlay_dir)?;

    println!(
        "{} {} components into {}",
        "Imported".green().bold(),
        set.len(),
        overlay_dir.as_str().yellow()
    );
    Ok(())
}
