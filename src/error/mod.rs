//! Error Module
//!
//! This module defines the error taxonomy for the TextForge backend and
//! its conversion into HTTP responses.
//!
//! # Design
//!
//! All failures that reach a client go through [`ApiError`]. Handlers and
//! the credential store propagate internal failures (`sqlx`, bcrypt, JWT
//! signing) with `?`; the `From` implementations in `types` classify them,
//! and the `IntoResponse` implementation in `conversion` renders the
//! uniform `{"success": false, "error": <message>}` body. No other layer
//! emits raw internal error detail to the client.

/// Error types and classification
pub mod types;

/// HTTP response conversion
pub mod conversion;

pub use types::ApiError;
