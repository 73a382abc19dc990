//! Core data types shared across the snapfind workspace.

use serde::{Deserialize, Serialize};

/// A catalog product record.
///
/// Records are immutable after catalog load; identity is positional within
/// the catalog. `keywords` drives filename matching, the remaining fields
/// are listing metadata passed through to API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Display name shown to shoppers.
    pub name: String,

    /// Free-form match phrases, in stored order. A record missing this
    /// field is treated as having no keywords, not as malformed.
    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keywords_deserializes_empty() {
        let product: Product = serde_json::from_str(r#"{"name": "Bare"}"#).unwrap();
        assert!(product.keywords.is_empty());
    }

    #[test]
    fn camel_case_wire_format() {
        let product: Product = serde_json::from_str(
            r#"{"name": "Cam", "keywords": ["cam"], "imageUrl": "https://example.com/cam.png"}"#,
        )
        .unwrap();
        assert_eq!(
            product.image_url.as_deref(),
            Some("https://example.com/cam.png")
        );
    }

    #[test]
    fn none_metadata_is_omitted_on_serialize() {
        let product = Product {
            name: "Cam".to_string(),
            keywords: vec!["cam".to_string()],
            description: None,
            category: None,
            price: None,
            image_url: None,
        };
        let json = serde_json::to_string(&product).unwrap();
        assert!(!json.contains("description"));
        assert!(!json.contains("imageUrl"));
    }
}
