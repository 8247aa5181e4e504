//! Sumo Logic application builder CLI
//!
//! Compose a layered application from component files, diff overlays and
//! builds, and push builds to a Sumo Logic organization.

mod cli;
mod commands;
mod config;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands, DebugAction};
use config::CliConfig;
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    logging::init(cli.verbose)?;

    let config = CliConfig::resolve(&cli)?;
    tracing::debug!(overlays = ?config.overlays, deployment = %config.remote.deployment, "Resolved configuration");
    let ctx = Context::new(&cli.app_path, config);

    execute_command(&ctx, cli.command)
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Build { output, overlay } => {
            commands::run_build(ctx, output.as_deref(), overlay.as_deref())
        }
        Commands::Import { file, overlay } => commands::run_import(ctx, &file, &overlay),
        Commands::Push {
            build,
            parent_folder,
            overwrite,
        } => commands::run_push(ctx, &build, &parent_folder, overwrite),
        Commands::DownloadFolder { id, output } => commands::run_download_folder(ctx, &id, &output),
        Commands::DiffOverlays { from, to, json } => {
            commands::run_diff_overlays(ctx, &from, &to, json)
        }
        Commands::DiffBuilds { from, to, json } => commands::run_diff_builds(&from, &to, json),
        Commands::Debug { action } => match action {
            DebugAction::Load { overlay, kind, key } => {
                commands::run_debug_load(ctx, &overlay, kind, &key)
            }
        },
    }
}
