//! Authentication Module
//!
//! This module handles user authentication, registration, and session
//! management.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`password`** - bcrypt hashing and verification
//! - **`users`** - Credential store: user records and database operations
//! - **`sessions`** - Access/refresh token issuance and the refresh cookie
//! - **`handlers`** - HTTP handlers for the authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Register**: validate fields, hash password, create user, issue
//!    both tokens (access in the body, refresh in an HTTP-only cookie)
//! 2. **Login**: look up by email, verify password, issue both tokens
//! 3. **Logout**: clear the refresh cookie unconditionally
//!
//! # Security
//!
//! - Passwords are stored only as salted bcrypt digests and are re-hashed
//!   only when the plaintext changes
//! - Access and refresh tokens use distinct secrets and TTLs
//! - The refresh token never appears in a JSON body
//! - Invalid credentials return 401 with one fixed message, whether the
//!   user exists or not

/// bcrypt hashing and verification
pub mod password;

/// User model and database operations
pub mod users;

/// Token issuance and refresh-cookie management
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthSuccess, LoginRequest, LogoutResponse, RegisterRequest};
pub use handlers::{login, logout, register};
pub use sessions::{TokenIssuer, TokenPair};
pub use users::User;
