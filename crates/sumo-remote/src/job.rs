//! Asynchronous content job bodies

use serde::Deserialize;

/// `{"id": "..."}` answer to a job start request.
#[derive(Debug, Clone, Deserialize)]
pub struct JobId {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum JobState {
    InProgress,
    Success,
    Failed,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub status: JobState,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

impl JobStatus {
    /// Best available explanation of a failed job.
    pub fn failure_message(&self) -> String {
        self.error
            .as_ref()
            .map(|e| e.message.clone())
            .or_else(|| self.status_message.clone())
            .unwrap_or_else(|| "no reason given".to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Error body of a non-success response: `{"errors": [{"code", "message"}]}`.
#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ApiError>,
}

/// The platform's explanation of a failed request, falling back to the raw
/// body.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed
            .errors
            .iter()
            .map(|e| {
                if e.code.is_empty() {
                    e.message.clone()
                } else {
                    format!("{} ({})", e.message, e.code)
                }
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ if body.trim().is_empty() => "no response body".to_string(),
        _ => body.trim().to_string(),
    }
}
