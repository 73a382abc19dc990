//! snapfind Gateway HTTP API Server
//!
//! Exposes the product identification endpoint and health reporting over
//! REST.

pub mod health_api;
pub mod identify_api;
pub mod server;

pub use server::{start_server, GatewayState};
