//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for docs-goto operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods at the binary and I/O edges.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when the search index as a whole cannot be loaded.
///
/// Individual malformed records never produce this error; they are dropped
/// while the rest of the index is built.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The index file could not be read.
    #[error("failed to read search index at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The index is not valid JSON.
    #[error("failed to parse search index: {0}")]
    Parse(#[from] serde_json::Error),
    /// The index parsed, but its top level is not an array of records.
    #[error("search index must be a JSON array of records, found {found}")]
    NotAnArray { found: &'static str },
}

/// Error returned when the host page lacks an element the overlay is bound to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("missing {role} element '#{id}'")]
    MissingElement { role: &'static str, id: String },
}

/// Error returned when the configuration file is unreadable or out of range.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}
