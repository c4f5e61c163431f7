//! Fuzzy matching of a query against every document in the index.

use super::index::{Document, DocumentIndex};
use super::scoring::{DEFAULT_PROXIMITY_DISTANCE, field_score, fold};

/// A document that matched the query, with its distance-like score.
///
/// `score` lies in `[0, 1]`; 0 is an exact match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchCandidate<'a> {
    /// Position of the document in its index
    pub position: usize,
    pub document: &'a Document,
    pub score: f64,
}

/// Scores documents by subsequence match over their title and description.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    proximity_distance: usize,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_PROXIMITY_DISTANCE)
    }
}

impl FuzzyMatcher {
    pub const fn new(proximity_distance: usize) -> Self {
        Self { proximity_distance }
    }

    /// Returns every document whose title or description contains the trimmed
    /// query as an ordered subsequence, in index order.
    ///
    /// An empty query matches nothing.
    pub fn find<'a>(&self, query: &str, index: &'a DocumentIndex) -> Vec<MatchCandidate<'a>> {
        let query = fold(query.trim());
        if query.is_empty() {
            return vec![];
        }

        index
            .iter()
            .enumerate()
            .filter_map(|(position, document)| {
                let score = self.document_score(&query, document)?;
                Some(MatchCandidate {
                    position,
                    document,
                    score,
                })
            })
            .collect()
    }

    /// Best score across the searchable fields, or `None` if no field matches.
    fn document_score(&self, query: &[char], document: &Document) -> Option<f64> {
        [document.title.as_str(), document.description.as_str()]
            .into_iter()
            .filter_map(|field| field_score(query, field, self.proximity_distance))
            .min_by(f64::total_cmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    fn index() -> DocumentIndex {
        DocumentIndex::new(vec![
            Document::new("Install", "Setup guide", "/install"),
            Document::new("Usage", "CLI usage", "/usage"),
            Document::new("Filters", "Filter responses by status", "/filters"),
        ])
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_empty_query_matches_nothing(#[case] query: &str) {
        check!(FuzzyMatcher::default().find(query, &index()).is_empty());
    }

    #[test]
    fn test_non_matching_documents_excluded() {
        let index = index();
        let matches = FuzzyMatcher::default().find("inst", &index);

        check!(matches.len() == 1);
        check!(matches[0].document.title == "Install");
        check!(matches[0].position == 0);
        check!(matches[0].score == 0.0);
    }

    #[test]
    fn test_description_matches_count() {
        let index = index();
        let matches = FuzzyMatcher::default().find("setup", &index);

        check!(matches.len() == 1);
        check!(matches[0].document.url == "/install");
    }

    #[test]
    fn test_best_field_wins() {
        // "usage" is exact in the title and offset in the description
        let index = index();
        let matches = FuzzyMatcher::default().find("usage", &index);
        check!(matches[0].score == 0.0);
    }

    #[test]
    fn test_query_is_trimmed() {
        let index = index();
        let padded = FuzzyMatcher::default().find("  filt ", &index);
        let plain = FuzzyMatcher::default().find("filt", &index);
        check!(padded == plain);
    }

    #[test]
    fn test_results_in_index_order() {
        let index = index();
        let matches = FuzzyMatcher::default().find("s", &index);
        let positions: Vec<usize> = matches.iter().map(|m| m.position).collect();
        check!(positions == vec![0, 1, 2]);
    }
}
