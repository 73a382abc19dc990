//! `snapfind-core` — shared types for the snapfind product identification
//! gateway.

pub mod types;

pub use types::Product;
