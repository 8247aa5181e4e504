//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sumo_core::ComponentKind;

/// Sumo Logic application builder - compose, diff and deploy layered apps
#[derive(Parser, Debug)]
#[command(name = "sumo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (defaults to ~/.sumo-cli.yaml)
    #[arg(long, global = true, env = "SUMO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Application directory holding the overlay directories
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub app_path: PathBuf,

    /// Overlay chain, most general first (e.g. base,middle,final)
    #[arg(long, global = true, env = "SUMO_OVERLAYS", value_delimiter = ',')]
    pub overlays: Option<Vec<String>>,

    /// Access ID of the Sumo Logic organization
    #[arg(short = 'i', long, global = true, env = "SUMO_ACCESS_ID", hide_env_values = true)]
    pub access_id: Option<String>,

    /// Access key of the Sumo Logic organization
    #[arg(short = 'k', long, global = true, env = "SUMO_ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// Deployment region (us1, us2, eu, au, ...)
    #[arg(short = 'r', long, global = true, env = "SUMO_DEPLOYMENT")]
    pub deployment: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Build an overlay into a deployable JSON artifact
    ///
    /// Loads every overlay of the chain, builds the most specific one (or
    /// the one given with --overlay) and prints the artifact.
    ///
    /// Examples:
    ///   sumo build                      # Print the build of the last overlay
    ///   sumo build -o build.json        # Write it to a file
    ///   sumo build --overlay base       # Build an intermediate overlay
    Build {
        /// File to write the artifact to (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overlay to build
        #[arg(long)]
        overlay: Option<String>,
    },

    /// Import an exported artifact into an overlay
    Import {
        /// Exported JSON artifact
        file: PathBuf,

        /// Overlay to write the components into
        #[arg(short = 's', long = "overlay", visible_alias = "app-overlay", default_value = "base")]
        overlay: String,
    },

    /// Push a build to a folder of your Sumo Logic organization
    Push {
        /// Build artifact to upload
        #[arg(default_value = "./build.json")]
        build: PathBuf,

        /// ID of the folder to put the application into
        #[arg(short = 'd', long)]
        parent_folder: String,

        /// Overwrite an existing destination folder
        #[arg(short = 'w', long)]
        overwrite: bool,
    },

    /// Download a folder of your Sumo Logic organization as an artifact
    DownloadFolder {
        /// ID of the folder to export
        id: String,

        /// File to write to, or - for stdout
        #[arg(short, long, default_value = "-")]
        output: String,
    },

    /// List the differences between two overlays
    DiffOverlays {
        /// Overlay to compare from
        from: String,

        /// Overlay to compare to
        to: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List the differences between two build artifacts
    DiffBuilds {
        /// Artifact to compare from
        from: PathBuf,

        /// Artifact to compare to
        to: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Inspect how components resolve
    Debug {
        #[command(subcommand)]
        action: DebugAction,
    },
}

/// Debug subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DebugAction {
    /// Print one resolved component of an overlay as YAML
    Load {
        /// Overlay to look in
        overlay: String,

        /// Component kind (variable, panel, dashboard, saved-search, folder)
        kind: ComponentKind,

        /// Component key
        key: String,
    },
}
