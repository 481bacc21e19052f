/**
 * Registration Handler
 *
 * Implements POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate username, email, and password (all required, password at
 *    least 6 characters) before the store is touched
 * 2. Check whether the email is already registered
 * 3. Create the user (the store hashes the password exactly once)
 * 4. Issue the access/refresh token pair
 * 5. Return 201 with the access token; the refresh token rides the
 *    HTTP-only cookie
 *
 * # Duplicate Email Status
 *
 * The pre-check failure returns status 500 with "Email is already
 * registered". That numeric code is a preserved wire contract from the
 * service this one replaces; a registration that loses the race and hits
 * the storage UNIQUE constraint instead classifies as 400.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use axum_extra::extract::CookieJar;

use crate::auth::handlers::send_token;
use crate::auth::handlers::types::{AuthSuccess, RegisterRequest};
use crate::auth::users::{create_user, get_user_by_email, normalize_email, validate_new_user};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Registration handler
///
/// # Errors
///
/// * `400` - Missing/short fields (per-field messages joined with ", ")
/// * `500` - Email already registered (preserved contract, see module docs)
/// * `400` - Storage uniqueness violation (concurrent registration race)
/// * `500` - Hashing, persistence, or signing failure ("Server Error")
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthSuccess>), ApiError> {
    tracing::info!("Register request for email: {}", request.email);

    // Reject missing/short fields before any store access
    validate_new_user(&request.username, &request.email, &request.password)?;

    let email = normalize_email(&request.email);
    if get_user_by_email(&state.pool, &email).await?.is_some() {
        tracing::warn!("Email already registered: {}", email);
        return Err(ApiError::app(
            "Email is already registered",
            StatusCode::INTERNAL_SERVER_ERROR,
        ));
    }

    let user = create_user(&state.pool, &request.username, &request.email, &request.password).await?;

    tracing::info!("User created successfully: {} ({})", user.username, user.email);

    send_token(&state, jar, user.id, StatusCode::CREATED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::sessions::REFRESH_COOKIE;

    fn request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let state = AppState::for_tests().await;

        let result = register(
            State(state.clone()),
            CookieJar::new(),
            Json(request("alice", "alice@example.com", "secret123")),
        )
        .await;

        let (status, jar, body) = result.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.success);
        assert!(!body.token.is_empty());

        // Access token names the new user
        let claims = state.tokens.verify_access(&body.token).unwrap();
        let user = get_user_by_email(&state.pool, "alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(claims.user_id().unwrap(), user.id);

        // Refresh token only in the cookie, not in the body
        let cookie = jar.get(REFRESH_COOKIE).expect("refresh cookie set");
        assert_eq!(cookie.http_only(), Some(true));
        assert!(!cookie.value().is_empty());
        assert_ne!(cookie.value(), body.token);
        assert!(state.tokens.verify_refresh(cookie.value()).is_ok());
    }

    #[tokio::test]
    async fn test_register_stored_password_is_hashed() {
        let state = AppState::for_tests().await;

        register(
            State(state.clone()),
            CookieJar::new(),
            Json(request("alice", "alice@example.com", "secret123")),
        )
        .await
        .unwrap();

        let user = get_user_by_email(&state.pool, "alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(user.password_hash, "secret123");
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let state = AppState::for_tests().await;

        let err = register(
            State(state),
            CookieJar::new(),
            Json(request("", "", "")),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message(),
            "Username is Required, Email is Required, Password is Required"
        );
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let state = AppState::for_tests().await;

        let err = register(
            State(state),
            CookieJar::new(),
            Json(request("alice", "alice@example.com", "abc")),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message(),
            "Password length should be greater than 6 characters"
        );
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let state = AppState::for_tests().await;

        register(
            State(state.clone()),
            CookieJar::new(),
            Json(request("alice", "alice@example.com", "secret123")),
        )
        .await
        .unwrap();

        let err = register(
            State(state),
            CookieJar::new(),
            Json(request("alice2", "alice@example.com", "secret456")),
        )
        .await
        .unwrap_err();

        // Preserved contract: the pre-check reports 500
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Email is already registered");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_case_insensitive() {
        let state = AppState::for_tests().await;

        register(
            State(state.clone()),
            CookieJar::new(),
            Json(request("alice", "alice@example.com", "secret123")),
        )
        .await
        .unwrap();

        let err = register(
            State(state),
            CookieJar::new(),
            Json(request("alice2", "ALICE@example.com", "secret456")),
        )
        .await
        .unwrap_err();

        assert_eq!(err.message(), "Email is already registered");
    }
}
