//! Server Module
//!
//! Configuration, shared application state, and server assembly.
//!
//! Configuration is read from the environment exactly once, at startup,
//! into plain structs; everything downstream receives it by injection.

/// Configuration structs and database setup
pub mod config;

/// Shared application state
pub mod state;

/// Application assembly
pub mod init;
