//! `snapfind-understanding` — cloud collaborators for image identification.
//!
//! Label detection over image bytes and text generation over a prompt, each
//! behind an OpenAI/Gemini provider switch.

pub mod generate;
pub mod labels;

pub use generate::{generate_text, TextProvider};
pub use labels::{detect_labels, LabelProvider};
