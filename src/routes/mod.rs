//! Routes Module
//!
//! Router assembly for the HTTP API.

/// Main router creation
pub mod router;

/// API route configuration
pub mod api_routes;
