//! Connection settings for the content API

use serde::{Deserialize, Serialize};

/// Deployment whose API lives at the bare `api.sumologic.com` host.
pub const DEFAULT_DEPLOYMENT: &str = "us1";

/// Credentials and region of a Sumo Logic organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RemoteConfig {
    pub access_id: String,
    pub access_key: String,
    pub deployment: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            access_id: String::new(),
            access_key: String::new(),
            deployment: DEFAULT_DEPLOYMENT.into(),
        }
    }
}

impl RemoteConfig {
    pub fn new(
        access_id: impl Into<String>,
        access_key: impl Into<String>,
        deployment: impl Into<String>,
    ) -> Self {
        Self {
            access_id: access_id.into(),
            access_key: access_key.into(),
            deployment: deployment.into(),
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.access_id.is_empty() && !self.access_key.is_empty()
    }

    /// API base URL of the configured deployment.
    pub fn base_url(&self) -> String {
        let deployment = self.deployment.trim().to_lowercase();
        if deployment.is_empty() || deployment == DEFAULT_DEPLOYMENT {
            "https://api.sumologic.com/api".to_string()
        } else {
            format!("https://api.{deployment}.sumologic.com/api")
        }
    }
}
