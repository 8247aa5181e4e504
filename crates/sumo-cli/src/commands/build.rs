//! Build command implementation

use std::path::Path;

use sumo_fs::{NormalizedPath, io};

use crate::context::Context;
use crate::error::Result;

/// Build an overlay and print the artifact, or write it to `output`.
///
/// Nothing is written unless the whole build succeeds.
pub fn run_build(ctx: &Context, output: Option<&Path>, overlay: Option<&str>) -> Result<()> {
    let mut application = ctx.load_application()?;
    application.build(overlay)?;
    let artifact = application.to_json()?;

    match output {
        Some(path) => {
            io::write_text(&NormalizedPath::new(path), &artifact)?;
            tracing::info!(path = %path.display(), "Wrote build");
        }
        None => println!("{artifact}"),
    }

    Ok(())
}
