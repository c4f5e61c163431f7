//! Runtime configuration loaded from TOML.
//!
//! Lookup order: the file named by `GOTO_CONFIG`, then
//! `<config dir>/docs-goto/config.toml`, then built-in defaults. Every key is
//! optional.

use crate::bindings::ElementIds;
use crate::error::ConfigError;
use crate::overlay::{DEFAULT_BLUR_CLOSE_DELAY, DEFAULT_SHORTCUT_KEY, Keymap, OverlaySettings};
use crate::scroll::{DEFAULT_TOP_THRESHOLD, ScrollTracker};
use crate::search::{
    DEFAULT_PROXIMITY_DISTANCE, DEFAULT_SCORE_THRESHOLD, DocumentIndex, FuzzyMatcher, Ranker,
    SearchEngine,
};
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "GOTO_CONFIG";
/// Environment variable overriding `index_path`.
pub const INDEX_ENV: &str = "GOTO_INDEX";

const DEFAULT_RESULT_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Pre-built search index (JSON array of `{title, description, url}`)
    pub index_path: Option<PathBuf>,
    pub search: SearchConfig,
    pub overlay: OverlayConfig,
    pub scroll: ScrollConfig,
    pub elements: ElementIds,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub threshold: f64,
    pub proximity_distance: usize,
    /// Default number of results returned by the `search` tool
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SCORE_THRESHOLD,
            proximity_distance: DEFAULT_PROXIMITY_DISTANCE,
            limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    pub shortcut_key: char,
    pub blur_close_delay_ms: u64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            shortcut_key: DEFAULT_SHORTCUT_KEY,
            blur_close_delay_ms: u64::try_from(DEFAULT_BLUR_CLOSE_DELAY.as_millis())
                .unwrap_or(u64::MAX),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    pub top_threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            top_threshold: DEFAULT_TOP_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Default level; `RUST_LOG` directives still apply on top
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Compact,
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads the config from the standard locations.
    pub fn load() -> Result<Self, ConfigError> {
        Self::locate(std::env::var_os(CONFIG_ENV))
    }

    /// Loads from `explicit` if given, else from the default location if that
    /// file exists, else returns defaults.
    pub fn locate(explicit: Option<OsString>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_path(Path::new(&path));
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.search.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::Invalid {
                key: "search.threshold",
                reason: format!("must be in (0, 1], got {}", threshold),
            });
        }
        if self.search.proximity_distance == 0 {
            return Err(ConfigError::Invalid {
                key: "search.proximity_distance",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.search.limit == 0 {
            return Err(ConfigError::Invalid {
                key: "search.limit",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.scroll.top_threshold.is_finite() || self.scroll.top_threshold < 0.0 {
            return Err(ConfigError::Invalid {
                key: "scroll.top_threshold",
                reason: format!(
                    "must be a non-negative number, got {}",
                    self.scroll.top_threshold
                ),
            });
        }
        Ok(())
    }

    /// Index path from `GOTO_INDEX` or the config file, with `~` expanded.
    pub fn index_path(&self) -> Option<PathBuf> {
        self.index_path_with(std::env::var_os(INDEX_ENV))
    }

    pub fn index_path_with(&self, env_override: Option<OsString>) -> Option<PathBuf> {
        env_override
            .map(PathBuf::from)
            .or_else(|| self.index_path.clone())
            .map(|path| expand_tilde(&path))
    }

    pub fn search_engine(&self, index: DocumentIndex) -> SearchEngine {
        SearchEngine::new(
            index,
            FuzzyMatcher::new(self.search.proximity_distance),
            Ranker::new(self.search.threshold),
        )
    }

    pub const fn overlay_settings(&self) -> OverlaySettings {
        OverlaySettings {
            blur_close_delay: Duration::from_millis(self.overlay.blur_close_delay_ms),
        }
    }

    pub const fn keymap(&self) -> Keymap {
        Keymap::new(self.overlay.shortcut_key)
    }

    pub const fn scroll_tracker(&self) -> ScrollTracker {
        ScrollTracker::new(self.scroll.top_threshold)
    }
}

/// `<config dir>/docs-goto/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("docs-goto").join("config.toml"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~` component, or with no known home directory,
/// are returned unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
