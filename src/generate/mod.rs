//! Text Generation Module
//!
//! Thin proxy to an external text-generation provider. This is a
//! collaborator boundary: request shaping is minimal and failures keep
//! their own simple `{message, error}` form instead of going through the
//! auth error classifier.
//!
//! The provider client is behind the [`TextGenerator`] trait so handlers
//! can be exercised without network access.

/// Provider client and the `TextGenerator` trait
pub mod client;

/// HTTP handlers for the generation endpoints
pub mod handlers;

pub use client::{GeneratorError, OpenAiClient, TextGenerator, Tuning};
pub use handlers::{chatbot, jsconverter, paragraph, run, scifi_image, summary};
