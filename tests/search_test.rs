mod common;

use assert2::{check, let_assert};
use common::{
    SAMPLE_INDEX_JSON, TempSite, document, engine, goto_state, sample_index, titles,
};
use docs_goto::tools::search::{SearchRequest, handle_search};
use docs_goto::{DocumentIndex, GotoState, IndexError, SearchEngine};
use rstest::rstest;
use std::sync::Arc;

// --- Index loading ---

/// Test: Malformed records are dropped, the rest of the index loads.
#[rstest]
fn index_drops_malformed_records(sample_index: DocumentIndex) {
    check!(sample_index.len() == 6);
    check!(sample_index.iter().all(|doc| doc.url != "/broken"));
}

/// Test: An index file on disk loads the same as the inline JSON.
#[test]
fn index_loads_from_disk() {
    let site = TempSite::new().with_sample_index();
    let index = DocumentIndex::from_path(&site.path().join("search-index.json")).unwrap();
    check!(index.len() == 6);
}

/// Test: A missing index file is an I/O error naming the path.
#[test]
fn index_missing_file_is_error() {
    let site = TempSite::new();
    let path = site.path().join("nope.json");
    let_assert!(Err(IndexError::Io { path: reported, .. }) = DocumentIndex::from_path(&path));
    check!(reported == path);
}

/// Test: A top-level value other than an array is rejected.
#[test]
fn index_rejects_non_array() {
    let_assert!(Err(IndexError::NotAnArray { .. }) = DocumentIndex::from_json("{\"title\": 1}"));
    check!(SAMPLE_INDEX_JSON.trim_start().starts_with('['));
}

// --- Ranking ---

/// Test: A near-exact prefix finds exactly the matching page.
#[rstest]
fn search_prefix_finds_install(engine: SearchEngine) {
    let results = engine.search("inst");
    check!(titles(&results) == ["Install"]);
    check!(results[0].score == 0.0);
}

/// Test: Case and surrounding whitespace do not change results.
#[rstest]
#[case("  INST ")]
#[case("Inst")]
fn search_is_case_insensitive_and_trimmed(engine: SearchEngine, #[case] query: &str) {
    check!(titles(&engine.search(query)) == ["Install"]);
}

/// Test: Two documents titled "Guide" collapse into the first one.
#[rstest]
fn search_dedups_by_title(engine: SearchEngine) {
    let results = engine.search("guide");
    check!(titles(&results) == ["Guide"]);
    check!(results[0].document.url == "/guide");
}

/// Test: Equal scores keep index order.
#[rstest]
fn search_ties_keep_index_order(engine: SearchEngine) {
    check!(titles(&engine.search("filter")) == ["Filters", "Filter syntax"]);
}

/// Test: Results are sorted by ascending score and all below the threshold.
#[rstest]
#[case("s")]
#[case("e")]
#[case("an")]
fn search_results_sorted_and_thresholded(engine: SearchEngine, #[case] query: &str) {
    let results = engine.search(query);
    check!(results.windows(2).all(|pair| pair[0].score <= pair[1].score));
    check!(results.iter().all(|r| r.score < 0.6));
}

/// Test: Empty and whitespace queries return nothing.
#[rstest]
#[case("")]
#[case("   ")]
fn search_empty_query(engine: SearchEngine, #[case] query: &str) {
    check!(engine.search(query).is_empty());
}

/// Test: Out-of-order characters do not match.
#[rstest]
fn search_requires_subsequence(engine: SearchEngine) {
    check!(engine.search("tsni").is_empty());
}

/// Test: An empty index is searchable and returns nothing.
#[test]
fn search_empty_index() {
    let engine = SearchEngine::with_defaults(DocumentIndex::new(vec![]));
    check!(engine.search("anything").is_empty());
}

/// Test: Results carry the full document so the host can navigate.
#[test]
fn search_returns_documents() {
    let engine = SearchEngine::with_defaults(DocumentIndex::new(vec![
        document("Install", "/install"),
        document("Usage", "/usage"),
    ]));
    let results = engine.search("usage");
    check!(results.len() == 1);
    check!(results[0].document == document("Usage", "/usage"));
}

// --- MCP search tool ---

/// Test: The search tool lists matches with their URLs.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tool_search_formats_results(goto_state: Arc<GotoState>) {
    let request = SearchRequest {
        query: "filter".to_string(),
        limit: None,
    };
    let output = handle_search(&goto_state, request).await.unwrap();
    check!(output.contains("Search results for 'filter'"));
    check!(output.contains("1. `Filters` (/filters)"));
    check!(output.contains("2. `Filter syntax` (/filters/syntax)"));
    check!(output.contains("Transform values in templates"));
}

/// Test: The limit truncates output and mentions the rest.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tool_search_respects_limit(goto_state: Arc<GotoState>) {
    let request = SearchRequest {
        query: "filter".to_string(),
        limit: Some(1),
    };
    let output = handle_search(&goto_state, request).await.unwrap();
    check!(output.contains("`Filters`"));
    check!(!output.contains("`Filter syntax`"));
    check!(output.contains("(1 more not shown)"));
}

/// Test: No matches produces a "No results found" message, not an error.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tool_search_no_results(goto_state: Arc<GotoState>) {
    let request = SearchRequest {
        query: "zzzz".to_string(),
        limit: None,
    };
    let output = handle_search(&goto_state, request).await.unwrap();
    check!(output.contains("No results found for 'zzzz'"));
}

/// Test: A zero limit is rejected.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tool_search_zero_limit(goto_state: Arc<GotoState>) {
    let request = SearchRequest {
        query: "guide".to_string(),
        limit: Some(0),
    };
    check!(handle_search(&goto_state, request).await.is_err());
}
