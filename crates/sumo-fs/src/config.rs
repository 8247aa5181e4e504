//! Format-agnostic loading and saving of definition files

use crate::{Error, NormalizedPath, Result, io};
use serde::{Serialize, de::DeserializeOwned};

/// Number of characters shown on each side of a parse failure.
const EXCERPT_RADIUS: usize = 10;

/// Serialization formats understood by [`ConfigStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Detect the format of a path, failing for unknown extensions.
    pub fn of(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("");
        Self::from_extension(extension).ok_or_else(|| Error::UnsupportedFormat {
            extension: extension.to_string(),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
            Self::Toml => "TOML",
        }
    }
}

/// Format-agnostic definition store.
///
/// Detects the format from the file extension and handles
/// serialization/deserialization transparently. Parse failures carry an
/// excerpt of the text surrounding the failing offset.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load a value from a file.
    ///
    /// Format is detected from file extension:
    /// - `.yaml`, `.yml` -> YAML
    /// - `.json` -> JSON
    /// - `.toml` -> TOML
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let format = ConfigFormat::of(path)?;
        let content = io::read_text(path)?;
        self.parse(&content, format, path)
    }

    /// Parse already-read content. `origin` is only used for error reporting.
    pub fn parse<T: DeserializeOwned>(
        &self,
        content: &str,
        format: ConfigFormat,
        origin: &NormalizedPath,
    ) -> Result<T> {
        let parse_error = |message: String| Error::ConfigParse {
            path: origin.to_native(),
            format: format.name().into(),
            message,
        };

        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| {
                let offset = e.location().map(|l| l.index());
                parse_error(describe(&e, content, offset))
            }),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| {
                let offset = Some(offset_of(content, e.line(), e.column()));
                parse_error(describe(&e, content, offset))
            }),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| {
                let offset = e.span().map(|s| s.start);
                parse_error(describe(&e, content, offset))
            }),
        }
    }

    /// Render a value in the given format.
    pub fn render<T: Serialize>(
        &self,
        value: &T,
        format: ConfigFormat,
        origin: &NormalizedPath,
    ) -> Result<String> {
        let serialize_error = |message: String| Error::ConfigSerialize {
            path: origin.to_native(),
            format: format.name().into(),
            message,
        };

        match format {
            ConfigFormat::Yaml => {
                serde_yaml::to_string(value).map_err(|e| serialize_error(e.to_string()))
            }
            ConfigFormat::Json => {
                serde_json::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))
            }
            ConfigFormat::Toml => {
                toml::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))
            }
        }
    }

    /// Save a value to a file.
    ///
    /// Format is determined from file extension.
    /// Uses atomic write to prevent corruption.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let format = ConfigFormat::of(path)?;
        let content = self.render(value, format, path)?;
        io::write_atomic(path, content.as_bytes())
    }
}

fn describe(error: &dyn std::fmt::Display, content: &str, offset: Option<usize>) -> String {
    match offset {
        Some(offset) => format!(
            "{} ~ error near '{}' (offset {})",
            error,
            excerpt_near(content, offset),
            offset
        ),
        None => error.to_string(),
    }
}

/// Byte offset of a 1-based line/column position.
fn offset_of(content: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (idx, text) in content.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            return offset + column.saturating_sub(1).min(text.len());
        }
        offset += text.len();
    }
    content.len()
}

/// The text surrounding `offset`, clamped to char boundaries.
pub fn excerpt_near(content: &str, offset: usize) -> &str {
    let offset = offset.min(content.len());

    let mut start = offset.saturating_sub(EXCERPT_RADIUS);
    while !content.is_char_boundary(start) {
        start -= 1;
    }

    let mut end = (offset + EXCERPT_RADIUS).min(content.len());
    while !content.is_char_boundary(end) {
        end += 1;
    }

    &content[start..end]
}
