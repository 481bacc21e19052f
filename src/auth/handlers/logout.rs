/**
 * Logout Handler
 *
 * Implements POST /api/auth/logout. Sessions are stateless, so logout is
 * nothing more than clearing the refresh cookie; it succeeds whether or
 * not the caller was ever logged in.
 */

use axum::{http::StatusCode, response::Json};
use axum_extra::extract::CookieJar;

use crate::auth::handlers::types::LogoutResponse;
use crate::auth::sessions::TokenIssuer;

/// Logout handler
///
/// Unconditionally clears the `refreshToken` cookie and returns 200.
pub async fn logout(jar: CookieJar) -> (StatusCode, CookieJar, Json<LogoutResponse>) {
    let jar = jar.remove(TokenIssuer::clear_refresh_cookie());

    (
        StatusCode::OK,
        jar,
        Json(LogoutResponse {
            success: true,
            message: "Logged out Successfully".to_string(),
        }),
    )
}
