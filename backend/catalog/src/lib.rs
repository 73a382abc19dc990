//! `snapfind-catalog` — product catalog loading and filename matching.
//!
//! Provides:
//! - Text normalization into a comparable lowercase token form
//! - Two-pass fuzzy matching of a query string against catalog keywords
//! - JSON catalog loading that degrades to an empty catalog on bad input

pub mod loader;
pub mod matcher;
pub mod normalize;

pub use loader::load_catalog;
pub use matcher::find_product;
pub use normalize::normalize;
