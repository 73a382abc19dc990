//! Catalog file loading.

use std::path::Path;

use snapfind_core::Product;
use tokio::fs;
use tracing::{info, warn};

/// Load the product catalog from a JSON array file.
///
/// A missing or unparsable file degrades to an empty catalog (filename
/// matching is simply disabled for the process lifetime) and is never
/// fatal. The returned order is the file order; the matcher depends on it.
pub async fn load_catalog(path: &Path) -> Vec<Product> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Catalog file unreadable; starting with an empty catalog"
            );
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Product>>(&raw) {
        Ok(products) => {
            info!(path = %path.display(), count = products.len(), "Loaded catalog");
            products
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Catalog file is not a JSON product array; starting with an empty catalog"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("snapfind-catalog-{}-{name}", std::process::id()))
    }

    #[tokio::test]
    async fn missing_file_yields_empty_catalog() {
        let catalog = load_catalog(Path::new("/nonexistent/snapfind/catalog.json")).await;
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn malformed_json_yields_empty_catalog() {
        let path = scratch_file("malformed.json");
        fs::write(&path, "{ not json ]").await.unwrap();
        let catalog = load_catalog(&path).await;
        assert!(catalog.is_empty());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn loads_records_in_file_order() {
        let path = scratch_file("ordered.json");
        fs::write(
            &path,
            r#"[
                {"name": "First", "keywords": ["one"]},
                {"name": "Second"},
                {"name": "Third", "keywords": ["three"], "price": 9.5}
            ]"#,
        )
        .await
        .unwrap();

        let catalog = load_catalog(&path).await;
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[0].name, "First");
        assert!(catalog[1].keywords.is_empty());
        assert_eq!(catalog[2].price, Some(9.5));
        let _ = fs::remove_file(&path).await;
    }
}
