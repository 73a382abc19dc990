//! Telemetry and structured logging components for snapfind.
//!
//! Handles console and rolling-file JSON output plus API-key redaction for
//! config echo lines.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::redact_sensitive_data;
