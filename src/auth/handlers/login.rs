/**
 * Login Handler
 *
 * Implements POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Require email and password
 * 2. Look up the user by (normalized) email
 * 3. Verify the password against the stored bcrypt digest
 * 4. Issue the access/refresh token pair
 *
 * # Security
 *
 * An unknown email and a wrong password produce byte-identical failures:
 * 401 with "Invalid Credentials". Neither the message nor the status
 * reveals whether the account exists.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use axum_extra::extract::CookieJar;

use crate::auth::handlers::send_token;
use crate::auth::handlers::types::{AuthSuccess, LoginRequest};
use crate::auth::users::{get_user_by_email, match_password};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `400` - Missing email or password
/// * `401` - Unknown email or wrong password (indistinguishable)
/// * `500` - Persistence or signing failure ("Server Error")
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthSuccess>), ApiError> {
    if request.email.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Please provide email or password"));
    }

    tracing::info!("Login request for: {}", request.email);

    let user = get_user_by_email(&state.pool, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login failed for: {}", request.email);
            ApiError::unauthorized()
        })?;

    if !match_password(&user, &request.password).await {
        tracing::warn!("Login failed for: {}", request.email);
        return Err(ApiError::unauthorized());
    }

    tracing::info!("User logged in successfully: {} ({})", user.username, user.email);

    send_token(&state, jar, user.id, StatusCode::OK)
}
