//! TextForge - Main Library
//!
//! TextForge is a small content-generation web service built with Rust.
//! It exposes user registration, login, and logout, plus a handful of
//! text-generation proxy endpoints backed by an external AI provider.
//!
//! # Overview
//!
//! This library provides the core functionality for the TextForge server:
//! - Credential storage with irreversible (bcrypt) password hashing
//! - Dual-token session management (short-lived access token in the
//!   response body, long-lived refresh token in an HTTP-only cookie)
//! - Centralized classification of persistence and validation failures
//!   into a uniform client-facing error shape
//! - Thin proxy handlers for text generation
//!
//! # Module Structure
//!
//! - **`auth`** - Credential store, password hashing, token issuance,
//!   and the register/login/logout handlers
//! - **`error`** - The error taxonomy and its HTTP response conversion
//! - **`generate`** - Text-generation provider client and proxy handlers
//! - **`routes`** - Router assembly
//! - **`server`** - Configuration, application state, and initialization
//!
//! # Usage
//!
//! ```rust,no_run
//! use textforge::server::config::ServerConfig;
//! use textforge::server::init::create_app;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum
//! # Ok(())
//! # }
//! ```

/// Authentication: users, passwords, sessions, handlers
pub mod auth;

/// Error taxonomy and HTTP conversion
pub mod error;

/// Text-generation provider client and handlers
pub mod generate;

/// Router assembly
pub mod routes;

/// Configuration, state, and server initialization
pub mod server;
