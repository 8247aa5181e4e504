//! Shared test utilities for the sumo workspace.
//!
//! Dev-dependency only, never published.
//!
//! - [`app`]: [`TestApp`] builder laying out overlay directories

pub mod app;

pub use app::TestApp;
