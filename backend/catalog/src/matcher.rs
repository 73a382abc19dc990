//! Two-pass product matching over catalog keywords.

use std::collections::HashSet;

use snapfind_core::Product;
use tracing::debug;

use crate::normalize::normalize;

/// Find the best catalog match for a query string, usually an upload's
/// filename.
///
/// A single trailing extension is stripped (everything after the last `.`),
/// then the query is normalized and compared in two passes:
///
/// 1. Exact equality against each product keyword, normalized individually.
/// 2. Word-subset inclusion against each product's combined keywords.
///
/// Both passes walk the catalog in stored order and return the first hit,
/// so catalog order is significant. Returns `None` when nothing matches,
/// including for queries that normalize to no words at all; an empty word
/// set must not subset-match every product.
pub fn find_product<'a>(query: &str, catalog: &'a [Product]) -> Option<&'a Product> {
    // Keep the text before the last dot; a dotless query is used whole.
    // Queries containing a literal non-extension dot get truncated too.
    let stem = match query.rfind('.') {
        Some(idx) => &query[..idx],
        None => query,
    };
    let normalized_query = normalize(stem);

    for product in catalog {
        for keyword in &product.keywords {
            if normalize(keyword) == normalized_query {
                debug!(product = %product.name, query = %normalized_query, "Exact keyword match");
                return Some(product);
            }
        }
    }

    let query_words: HashSet<&str> = normalized_query.split_whitespace().collect();
    if query_words.is_empty() {
        return None;
    }

    for product in catalog {
        let combined = normalize(&product.keywords.join(" "));
        let product_words: HashSet<&str> = combined.split_whitespace().collect();
        if query_words.is_subset(&product_words) {
            debug!(product = %product.name, query = %normalized_query, "Keyword subset match");
            return Some(product);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, keywords: &[&str]) -> Product {
        Product {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            description: None,
            category: None,
            price: None,
            image_url: None,
        }
    }

    #[test]
    fn exact_keyword_match_ignores_separators_and_case() {
        let catalog = vec![product("iPhone 11 Pro", &["iPhone 11 Pro", "iphone11pro"])];
        let hit = find_product("iphone+11_pro.jpg", &catalog);
        assert_eq!(hit.map(|p| p.name.as_str()), Some("iPhone 11 Pro"));
    }

    #[test]
    fn subset_match_tolerates_reordered_partial_queries() {
        let catalog = vec![product("Running Shoes", &["running shoes nike"])];
        let hit = find_product("nike-running.jpg", &catalog);
        assert_eq!(hit.map(|p| p.name.as_str()), Some("Running Shoes"));
    }

    #[test]
    fn extra_query_words_defeat_the_subset_pass() {
        let catalog = vec![product("Running Shoes", &["running shoes nike"])];
        assert!(find_product("nike-running-marathon.jpg", &catalog).is_none());
    }

    #[test]
    fn empty_query_never_matches() {
        let catalog = vec![product("X", &["x"])];
        assert!(find_product("", &catalog).is_none());
        assert!(find_product("++--__..", &catalog).is_none());
    }

    #[test]
    fn empty_catalog_never_matches() {
        assert!(find_product("anything.jpg", &[]).is_none());
    }

    #[test]
    fn keywordless_product_is_skipped_in_both_passes() {
        let catalog = vec![
            product("Mystery Item", &[]),
            product("Running Shoes", &["running shoes nike"]),
        ];
        let hit = find_product("nike-running.jpg", &catalog);
        assert_eq!(hit.map(|p| p.name.as_str()), Some("Running Shoes"));
    }

    #[test]
    fn first_catalog_entry_wins_on_exact_ties() {
        let catalog = vec![
            product("First Cam", &["security camera"]),
            product("Second Cam", &["security camera"]),
        ];
        let hit = find_product("security-camera.png", &catalog);
        assert_eq!(hit.map(|p| p.name.as_str()), Some("First Cam"));
    }

    #[test]
    fn exact_pass_beats_an_earlier_subset_candidate() {
        // "DroneGuard" only subset-matches, while the later product carries
        // the exact keyword; pass 1 must win across the whole catalog.
        let catalog = vec![
            product("Drone Bundle", &["aerial drone camera patrol"]),
            product("DroneGuard 360", &["drone camera"]),
        ];
        let hit = find_product("drone_camera.jpg", &catalog);
        assert_eq!(hit.map(|p| p.name.as_str()), Some("DroneGuard 360"));
    }

    #[test]
    fn only_the_last_extension_is_stripped() {
        let catalog = vec![product("Archive", &["backup tar"])];
        // "backup.tar.gz" loses only ".gz"; the remaining dot folds to a
        // space during normalization.
        let hit = find_product("backup.tar.gz", &catalog);
        assert_eq!(hit.map(|p| p.name.as_str()), Some("Archive"));
    }

    #[test]
    fn non_ascii_filenames_do_not_panic_and_do_not_match() {
        let catalog = vec![product("Running Shoes", &["running shoes nike"])];
        assert!(find_product("фото-залипуха.jpg", &catalog).is_none());
        assert!(find_product("写真.png", &catalog).is_none());
    }

    #[test]
    fn duplicate_query_words_do_not_require_duplicates_in_keywords() {
        let catalog = vec![product("Running Shoes", &["running shoes nike"])];
        let hit = find_product("running-running-nike.jpg", &catalog);
        assert_eq!(hit.map(|p| p.name.as_str()), Some("Running Shoes"));
    }
}
