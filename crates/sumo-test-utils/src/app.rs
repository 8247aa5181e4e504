//! [`TestApp`] builder for overlay test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary application directory with one sub-directory per overlay.
///
/// # Example
///
/// ```rust,no_run
/// use sumo_test_utils::TestApp;
///
/// let app = TestApp::new();
/// app.variable("base", "v1", "defaultValue: x\ndisplayName: V1");
/// app.panel("base", "p1", "title: CPU\npanelType: SumoSearchPanel");
/// app.variable("final", "v1", "defaultValue: y");
/// app.assert_file_exists("base/variables/v1.yaml");
/// ```
pub struct TestApp {
    temp_dir: TempDir,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Create an empty temporary application directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of an overlay directory, whether or not it exists yet.
    pub fn overlay_path(&self, overlay: &str) -> PathBuf {
        self.root().join(overlay)
    }

    /// Create an empty overlay directory.
    pub fn overlay(&self, overlay: &str) -> &Self {
        fs::create_dir_all(self.overlay_path(overlay)).unwrap();
        self
    }

    /// Write `content` to `relative` (below the application root).
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        self
    }

    /// Write a single component as `<overlay>/<dir>/<key>.yaml`.
    ///
    /// `body` is the YAML body of the definition, without the key line.
    pub fn component(&self, overlay: &str, dir: &str, key: &str, body: &str) -> &Self {
        let indented = body
            .lines()
            .map(|line| format!("  {line}"))
            .collect::<Vec<_>>()
            .join("\n");
        let content = if indented.trim().is_empty() {
            format!("{key}: {{}}\n")
        } else {
            format!("{key}:\n{indented}\n")
        };
        self.write(&format!("{overlay}/{dir}/{key}.yaml"), &content)
    }

    pub fn variable(&self, overlay: &str, key: &str, body: &str) -> &Self {
        self.component(overlay, "variables", key, body)
    }

    pub fn panel(&self, overlay: &str, key: &str, body: &str) -> &Self {
        self.component(overlay, "panels", key, body)
    }

    pub fn dashboard(&self, overlay: &str, key: &str, body: &str) -> &Self {
        self.component(overlay, "dashboards", key, body)
    }

    pub fn saved_search(&self, overlay: &str, key: &str, body: &str) -> &Self {
        self.component(overlay, "saved-searches", key, body)
    }

    pub fn folder(&self, overlay: &str, key: &str, body: &str) -> &Self {
        self.component(overlay, "folders", key, body)
    }

    /// Write the overlay's `init.yaml`.
    pub fn root_definition(&self, overlay: &str, content: &str) -> &Self {
        self.write(&format!("{overlay}/init.yaml"), content)
    }

    /// Assert that `path` (relative to the application root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }
}
