/**
 * Authentication Handler Types
 *
 * Request and response bodies shared by the register, login, and logout
 * handlers. Request fields use serde defaults so a missing JSON field is
 * reported by field validation rather than rejected at deserialization.
 */

use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    /// User's chosen username
    #[serde(default)]
    pub username: String,
    /// User's email address (login key)
    #[serde(default)]
    pub email: String,
    /// User's password (hashed before storage, minimum length 6)
    #[serde(default)]
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    /// User's email address
    #[serde(default)]
    pub email: String,
    /// User's password (verified against the stored digest)
    #[serde(default)]
    pub password: String,
}

/// Successful authentication response
///
/// Carries only the access token; the refresh token travels exclusively
/// in the HTTP-only cookie.
#[derive(Serialize, Debug)]
pub struct AuthSuccess {
    /// Always true on this path
    pub success: bool,
    /// Short-lived access token
    pub token: String,
}

/// Logout response
#[derive(Serialize, Debug)]
pub struct LogoutResponse {
    /// Always true; logout is idempotent
    pub success: bool,
    /// Confirmation message
    pub message: String,
}
