//! Sumo Logic content import and export client
//!
//! Uploads built application artifacts into a folder and downloads folders
//! as artifacts. Both directions run as asynchronous jobs on the platform;
//! the client starts a job and polls its status until it leaves the
//! in-progress state.

pub mod client;
pub mod config;
pub mod error;
pub mod job;

pub use client::ContentClient;
pub use config::RemoteConfig;
pub use error::{Error, Result};
pub use job::{JobState, JobStatus};
