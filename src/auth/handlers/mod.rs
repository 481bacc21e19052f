//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints:
//!
//! - **`register`** - POST /api/auth/register - User registration
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`logout`** - POST /api/auth/logout - Clear the refresh cookie
//!
//! Each request moves through the same stages: validate, consult the
//! credential store, and on success mint both tokens. Failures are typed
//! [`ApiError`](crate::error::ApiError) values propagated with `?` to the
//! classifier; no handler builds its own error body.

use axum::http::StatusCode;
use axum::response::Json;
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::error::ApiError;
use crate::server::state::AppState;

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

pub use login::login;
pub use logout::logout;
pub use register::register;
pub use types::{AuthSuccess, LoginRequest, LogoutResponse, RegisterRequest};

/// Issue both tokens and assemble the success response
///
/// The access token goes in the JSON body; the refresh token is attached
/// to the cookie jar and never appears in the body.
fn send_token(
    state: &AppState,
    jar: CookieJar,
    user_id: Uuid,
    status: StatusCode,
) -> Result<(StatusCode, CookieJar, Json<AuthSuccess>), ApiError> {
    let pair = state.tokens.issue(user_id)?;
    let jar = jar.add(state.tokens.refresh_cookie(&pair.refresh));

    Ok((
        status,
        jar,
        Json(AuthSuccess {
            success: true,
            token: pair.access,
        }),
    ))
}
