//! Layered CLI configuration
//!
//! Later layers win: built-in defaults, the YAML config file
//! (`--config`, else `~/.sumo-cli.yaml` when present), then environment
//! variables and command-line flags.

use crate::cli::Cli;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use sumo_fs::{ConfigStore, NormalizedPath};
use sumo_remote::RemoteConfig;

/// Name of the per-user config file in the home directory.
pub const CONFIG_FILE_NAME: &str = ".sumo-cli.yaml";

pub const DEFAULT_OVERLAYS: [&str; 3] = ["base", "middle", "final"];

/// One configuration layer; unset values defer to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConfigLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlays: Option<Vec<String>>,
}

impl ConfigLayer {
    /// Load a layer from a YAML or JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let layer: Option<Self> = ConfigStore::new().load(&NormalizedPath::new(path))?;
        Ok(layer.unwrap_or_default())
    }

    /// Values set by environment variables or flags.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            access_id: cli.access_id.clone(),
            access_key: cli.access_key.clone(),
            deployment: cli.deployment.clone(),
            overlays: cli.overlays.clone(),
        }
    }

    /// Overlay `other` on top of this layer.
    pub fn merge(&mut self, other: &ConfigLayer) {
        if other.access_id.is_some() {
            self.access_id.clone_from(&other.access_id);
        }
        if other.access_key.is_some() {
            self.access_key.clone_from(&other.access_key);
        }
        if other.deployment.is_some() {
            self.deployment.clone_from(&other.deployment);
        }
        if other.overlays.as_ref().is_some_and(|o| !o.is_empty()) {
            self.overlays.clone_from(&other.overlays);
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub remote: RemoteConfig,
    pub overlays: Vec<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            overlays: DEFAULT_OVERLAYS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CliConfig {
    /// Resolve every layer for this invocation.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => Some(ConfigLayer::load(path)?),
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => Some(ConfigLayer::load(&path)?),
                None => None,
            },
        };

        let mut layers = file.unwrap_or_default();
        layers.merge(&ConfigLayer::from_cli(cli));
        Ok(Self::from_layer(layers))
    }

    /// Apply a merged layer on top of the defaults.
    pub fn from_layer(layer: ConfigLayer) -> Self {
        let mut config = Self::default();
        if let Some(access_id) = layer.access_id {
            config.remote.access_id = access_id;
        }
        if let Some(access_key) = layer.access_key {
            config.remote.access_key = access_key;
        }
        if let Some(deployment) = layer.deployment {
            config.remote.deployment = deployment;
        }
        if let Some(overlays) = layer.overlays.filter(|o| !o.is_empty()) {
            config.overlays = overlays;
        }
        config
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_layers() {
        let config = CliConfig::from_layer(ConfigLayer::default());

        assert_eq!(config.remote.deployment, "us1");
        assert_eq!(config.overlays, vec!["base", "middle", "final"]);
    }

    #[test]
    fn later_layer_wins_per_field() {
        let mut file = ConfigLayer {
            access_id: Some("file-id".into()),
            access_key: Some("file-key".into()),
            deployment: Some("eu".into()),
            overlays: Some(vec!["base".into(), "prod".into()]),
        };
        let flags = ConfigLayer {
            access_id: Some("flag-id".into()),
            overlays: Some(Vec::new()),
            ..Default::default()
        };

        file.merge(&flags);
        let config = CliConfig::from_layer(file);

        assert_eq!(config.remote.access_id, "flag-id");
        assert_eq!(config.remote.access_key, "file-key");
        assert_eq!(config.remote.deployment, "eu");
        assert_eq!(config.overlays, vec!["base", "prod"]);
    }

    #[test]
    fn loads_kebab_case_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sumo.yaml");
        fs::write(
            &path,
            "access-id: abc\naccess-key: secret\ndeployment: us2\noverlays: [base, final]\n",
        )
        .unwrap();

        let layer = ConfigLayer::load(&path).unwrap();

        assert_eq!(layer.access_id.as_deref(), Some("abc"));
        assert_eq!(layer.deployment.as_deref(), Some("us2"));
        assert_eq!(layer.overlays, Some(vec!["base".to_string(), "final".to_string()]));
    }

    #[test]
    fn empty_config_file_is_an_empty_layer() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sumo.yaml");
        fs::write(&path, "").unwrap();

        assert_eq!(ConfigLayer::load(&path).unwrap(), ConfigLayer::default());
    }
}
