//! Error types for sumo-remote

/// Result type for sumo-remote operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the content API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or its body could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-success status
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Job {job} failed: {message}")]
    JobFailed { job: String, message: String },

    #[error("Missing credentials: set an access id and access key")]
    MissingCredentials,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
