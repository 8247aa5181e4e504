//! Push and download command implementations

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use sumo_core::parse_artifact;
use sumo_fs::{NormalizedPath, io};
use sumo_remote::ContentClient;

use crate::context::Context;
use crate::error::Result;

/// Upload a build artifact into the folder `parent_folder`.
pub fn run_push(ctx: &Context, build: &Path, parent_folder: &str, overwrite: bool) -> Result<()> {
    let path = NormalizedPath::new(build);
    let artifact = io::read_text(&path)?;
    // Reject a malformed build locally, with a pointer to the bad offset
    parse_artifact(&artifact, &path)?;

    let client = ContentClient::new(ctx.config.remote.clone())?;
    runtime()?.block_on(client.upload(parent_folder, &artifact, overwrite))?;

    println!(
        "{} {} into folder {}",
        "Pushed".green().bold(),
        build.display(),
        parent_folder.yellow()
    );
    Ok(())
}

/// Export the folder `id` to `output` (`-` for stdout).
pub fn run_download_folder(ctx: &Context, id: &str, output: &str) -> Result<()> {
    let client = ContentClient::new(ctx.config.remote.clone())?;
    let content = runtime()?.block_on(client.download(id))?;

    if output == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&content)?;
        stdout.flush()?;
    } else {
        io::write_atomic(&NormalizedPath::new(output), &content)?;
        tracing::info!(path = output, bytes = content.len(), "Wrote download");
    }

    Ok(())
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
