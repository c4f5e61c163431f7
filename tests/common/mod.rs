//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `sample_index`: a small documentation index with overlapping titles
//! - `engine`: a [`SearchEngine`] over `sample_index` with default settings
//! - `goto_state`: shared server state with no overlay attached yet
//!
//! Tests that drive the overlay call [`attach_default`] first. [`TempSite`]
//! writes an index and config file to disk for loading tests.

use docs_goto::tools::attach::{AttachRequest, handle_attach};
use docs_goto::{Config, Document, DocumentIndex, GotoState, SearchEngine};
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Element ids present on a page built from the default templates.
pub const DEFAULT_PAGE: &[&str] = &[
    "goto-popup",
    "goto-input",
    "goto-results",
    "goto-button",
    "scroll-element",
    "scroll-fill",
    "scroll-to-top",
    "content",
];

/// Index JSON as emitted by the site generator, including one malformed record.
pub const SAMPLE_INDEX_JSON: &str = r#"[
    {"title": "Install", "description": "Download and set up the CLI", "url": "/install"},
    {"title": "Guide", "description": "First steps", "url": "/guide"},
    {"title": "Guide", "description": "Advanced usage", "url": "/guide/advanced"},
    {"title": "Filters", "description": "Transform values in templates", "url": "/filters"},
    {"title": "Filter syntax", "description": "Pipes and arguments", "url": "/filters/syntax"},
    {"title": "Scripting", "description": "Embedding the engine", "url": "/scripting"},
    {"description": "record without a title", "url": "/broken"}
]"#;

/// A temporary directory holding a site's search index and config file.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempSite {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempSite {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes `content` to `path` inside the site, creating parent directories.
    pub fn create_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
        full_path
    }

    /// Writes [`SAMPLE_INDEX_JSON`] to `search-index.json`.
    pub fn with_sample_index(self) -> Self {
        self.create_file("search-index.json", SAMPLE_INDEX_JSON);
        self
    }
}

impl Default for TempSite {
    fn default() -> Self {
        Self::new()
    }
}

#[fixture]
pub fn sample_index() -> DocumentIndex {
    DocumentIndex::from_json(SAMPLE_INDEX_JSON).expect("sample index should parse")
}

#[fixture]
pub fn engine(sample_index: DocumentIndex) -> SearchEngine {
    SearchEngine::with_defaults(sample_index)
}

#[fixture]
pub fn goto_state(engine: SearchEngine) -> Arc<GotoState> {
    Arc::new(GotoState::new(Arc::new(engine), Config::default()))
}

/// Attaches an overlay session for a page containing [`DEFAULT_PAGE`].
#[allow(dead_code)] // Used by some integration test crates
pub async fn attach_default(state: &Arc<GotoState>) {
    let request = AttachRequest {
        elements: DEFAULT_PAGE.iter().map(|id| (*id).to_string()).collect(),
    };
    handle_attach(state, request)
        .await
        .expect("default page should attach");
}

/// Titles of a result list, in order.
#[allow(dead_code)] // Used by some integration test crates
pub fn titles(results: &[docs_goto::RankedResult]) -> Vec<&str> {
    results.iter().map(|r| r.document.title.as_str()).collect()
}

#[allow(dead_code)]
pub fn document(title: &str, url: &str) -> Document {
    Document::new(title, "", url)
}
