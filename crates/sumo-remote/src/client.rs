//! Content API client

use crate::config::RemoteConfig;
use crate::job::{self, JobId, JobState, JobStatus};
use crate::{Error, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Delay between two status polls of a running job.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Client for the `/v2/content` endpoints of one organization.
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    config: RemoteConfig,
    base_url: String,
    poll_interval: Duration,
}

impl ContentClient {
    /// Create a client; fails when the access id or key is missing.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        if !config.has_credentials() {
            return Err(Error::MissingCredentials);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("sumo/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            config,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Point the client at another API root, e.g. a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Import a built artifact into the folder `folder_id` and wait for the
    /// import job to finish.
    pub async fn upload(&self, folder_id: &str, artifact: &str, overwrite: bool) -> Result<()> {
        let url = format!(
            "{}/v2/content/folders/{folder_id}/import?overwrite={overwrite}",
            self.base_url
        );
        let request = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(artifact.to_owned());
        let job: JobId = self.send_json(request).await?;
        tracing::info!(folder = folder_id, job = %job.id, "Started content import");

        let status_url = format!(
            "{}/v2/content/folders/{folder_id}/import/{}/status",
            self.base_url, job.id
        );
        self.wait_for(&job.id, &status_url).await
    }

    /// Export the content `content_id` and return the exported artifact.
    pub async fn download(&self, content_id: &str) -> Result<Vec<u8>> {
        let url = format!("{}/v2/content/{content_id}/export", self.base_url);
        let job: JobId = self.send_json(self.http.post(&url)).await?;
        tracing::info!(content = content_id, job = %job.id, "Started content export");

        let job_url = format!("{}/v2/content/{content_id}/export/{}", self.base_url, job.id);
        self.wait_for(&job.id, &format!("{job_url}/status")).await?;

        let response = self.send(self.http.get(format!("{job_url}/result"))).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Poll a job until it is no longer in progress. Only the in-progress
    /// state is retried.
    async fn wait_for(&self, job_id: &str, status_url: &str) -> Result<()> {
        loop {
            let status: JobStatus = self.send_json(self.http.get(status_url)).await?;
            match status.status {
                JobState::InProgress => {
                    tracing::debug!(job = job_id, "Job in progress");
                    tokio::time::sleep(self.poll_interval).await;
                }
                JobState::Success => {
                    tracing::info!(job = job_id, "Job finished");
                    return Ok(());
                }
                JobState::Failed => {
                    return Err(Error::JobFailed {
                        job: job_id.into(),
                        message: status.failure_message(),
                    });
                }
            }
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request.header(ACCEPT, "application/json")).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .basic_auth(&self.config.access_id, Some(&self.config.access_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status,
                message: job::error_message(&body),
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_are_rejected() {
        let err = ContentClient::new(RemoteConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));
    }

    #[test]
    fn base_url_comes_from_deployment() {
        let client = ContentClient::new(RemoteConfig::new("id", "key", "au")).unwrap();
        assert_eq!(client.base_url(), "https://api.au.sumologic.com/api");

        let proxied = client.with_base_url("http://localhost:8080/api/");
        assert_eq!(proxied.base_url(), "http://localhost:8080/api");
    }
}
