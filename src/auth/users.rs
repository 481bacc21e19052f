/**
 * User Model and Database Operations
 *
 * The credential store. Owns two invariants:
 *
 * - A password is persisted only as a bcrypt digest, never as the
 *   plaintext the client submitted.
 * - Hashing happens exactly where the plaintext enters or changes:
 *   `create_user` and `update_password`. Every other update leaves the
 *   digest untouched, so an already-hashed value is never re-hashed.
 *
 * Emails are normalized to lowercase before store and compare, making the
 * uniqueness check case-insensitive. The application-level existence check
 * in the register handler is only a fast path; the UNIQUE constraint on
 * `users.email` is the real guard against concurrent registrations.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::password;
use crate::error::ApiError;

/// Minimum plaintext password length, checked before hashing
pub const MIN_PASSWORD_LEN: usize = 6;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username
    pub username: String,
    /// User email address (unique, lowercase, used as the login key)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Billing customer ID (optional)
    pub customer_id: Option<String>,
    /// Subscription tier (optional)
    pub subscription: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Validate registration fields, collecting every failure
///
/// Messages are collected per field so the classifier can report them all
/// at once, joined with ", ".
pub(crate) fn validate_new_user(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    let mut problems = Vec::new();
    if username.trim().is_empty() {
        problems.push("Username is Required".to_string());
    }
    if email.trim().is_empty() {
        problems.push("Email is Required".to_string());
    }
    if password.is_empty() {
        problems.push("Password is Required".to_string());
    } else if password.len() < MIN_PASSWORD_LEN {
        problems.push("Password length should be greater than 6 characters".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(problems))
    }
}

/// Create a new user
///
/// Validates the fields, hashes the plaintext exactly once, and inserts
/// the record. A concurrent registration with the same email loses the
/// race at the UNIQUE constraint and surfaces as a duplicate-field error.
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `username` - User's chosen username
/// * `email` - User email (normalized before storage)
/// * `plaintext` - Password as submitted; never persisted
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    plaintext: &str,
) -> Result<User, ApiError> {
    validate_new_user(username, email, plaintext)?;

    let password_hash = password::hash(plaintext).await?;
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, email, password_hash, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, username, email, password_hash, customer_id, subscription, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(normalize_email(email))
    .bind(&password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, customer_id, subscription, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(normalize_email(email))
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, customer_id, subscription, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Check a submitted password against the stored digest
///
/// Delegates to the password module's verifier; a malformed stored digest
/// fails closed rather than erroring.
pub async fn match_password(user: &User, plaintext: &str) -> bool {
    password::verify(plaintext, &user.password_hash).await
}

/// Change a user's password
///
/// The only update that re-hashes: the plaintext changed, so a fresh
/// digest is generated before persisting.
pub async fn update_password(
    pool: &SqlitePool,
    user_id: Uuid,
    plaintext: &str,
) -> Result<User, ApiError> {
    if plaintext.is_empty() {
        return Err(ApiError::Validation(vec!["Password is Required".to_string()]));
    }
    if plaintext.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(vec![
            "Password length should be greater than 6 characters".to_string(),
        ]));
    }

    let password_hash = password::hash(plaintext).await?;
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET password_hash = $1, updated_at = $2
        WHERE id = $3
        RETURNING id, username, email, password_hash, customer_id, subscription, created_at, updated_at
        "#,
    )
    .bind(&password_hash)
    .bind(now)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Update user's billing customer ID
///
/// Does not touch the password digest.
pub async fn update_customer_id(
    pool: &SqlitePool,
    user_id: Uuid,
    customer_id: &str,
) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET customer_id = $1, updated_at = $2
        WHERE id = $3
        RETURNING id, username, email, password_hash, customer_id, subscription, created_at, updated_at
        "#,
    )
    .bind(customer_id)
    .bind(now)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Update user's subscription tier
///
/// Does not touch the password digest.
pub async fn update_subscription(
    pool: &SqlitePool,
    user_id: Uuid,
    subscription: &str,
) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET subscription = $1, updated_at = $2
        WHERE id = $3
        RETURNING id, username, email, password_hash, customer_id, subscription, created_at, updated_at
        "#,
    )
    .bind(subscription)
    .bind(now)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::config::test_pool;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_create_and_find_user() {
        let pool = test_pool().await;

        let created = create_user(&pool, "alice", "alice@example.com", "secret123")
            .await
            .unwrap();
        assert_eq!(created.username, "alice");
        assert_eq!(created.email, "alice@example.com");

        let found = get_user_by_email(&pool, "alice@example.com")
            .await
            .unwrap()
            .expect("user should exist");
        assert_eq!(found.id, created.id);

        let by_id = get_user_by_id(&pool, created.id).await.unwrap();
        assert!(by_id.is_some());
    }

    #[tokio::test]
    async fn test_password_stored_as_digest() {
        let pool = test_pool().await;

        let user = create_user(&pool, "alice", "alice@example.com", "secret123")
            .await
            .unwrap();
        assert_ne!(user.password_hash, "secret123");
        assert!(match_password(&user, "secret123").await);
        assert!(!match_password(&user, "secret124").await);
    }

    #[tokio::test]
    async fn test_duplicate_email_hits_unique_constraint() {
        let pool = test_pool().await;

        create_user(&pool, "alice", "alice@example.com", "secret123")
            .await
            .unwrap();
        // Second insert bypasses any handler-level existence check and must
        // be rejected by the storage layer.
        let err = create_user(&pool, "alice2", "alice@example.com", "secret456")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Duplicate field value entered");
    }

    #[tokio::test]
    async fn test_email_normalized_before_store_and_lookup() {
        let pool = test_pool().await;

        let user = create_user(&pool, "alice", "Alice@Example.COM", "secret123")
            .await
            .unwrap();
        assert_eq!(user.email, "alice@example.com");

        let found = get_user_by_email(&pool, "ALICE@example.com").await.unwrap();
        assert!(found.is_some());

        let err = create_user(&pool, "other", "alice@EXAMPLE.com", "secret456")
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Duplicate field value entered");
    }

    #[tokio::test]
    async fn test_validation_collects_all_failures() {
        let pool = test_pool().await;

        let err = create_user(&pool, "", "", "").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message(),
            "Username is Required, Email is Required, Password is Required"
        );
    }

    #[tokio::test]
    async fn test_short_password_rejected_before_hashing() {
        let pool = test_pool().await;

        let err = create_user(&pool, "alice", "alice@example.com", "abc")
            .await
            .unwrap_err();
        assert_eq!(
            err.message(),
            "Password length should be greater than 6 characters"
        );
        // Nothing was persisted
        let found = get_user_by_email(&pool, "alice@example.com").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_update_password_rehashes() {
        let pool = test_pool().await;

        let user = create_user(&pool, "alice", "alice@example.com", "secret123")
            .await
            .unwrap();
        let updated = update_password(&pool, user.id, "newsecret456").await.unwrap();

        assert_ne!(updated.password_hash, user.password_hash);
        assert!(match_password(&updated, "newsecret456").await);
        assert!(!match_password(&updated, "secret123").await);
    }

    #[tokio::test]
    async fn test_non_password_updates_leave_digest_alone() {
        let pool = test_pool().await;

        let user = create_user(&pool, "alice", "alice@example.com", "secret123")
            .await
            .unwrap();
        let after_billing = update_customer_id(&pool, user.id, "cus_123").await.unwrap();
        let after_tier = update_subscription(&pool, user.id, "pro").await.unwrap();

        assert_eq!(after_billing.password_hash, user.password_hash);
        assert_eq!(after_tier.password_hash, user.password_hash);
        assert_eq!(after_tier.customer_id.as_deref(), Some("cus_123"));
        assert_eq!(after_tier.subscription.as_deref(), Some("pro"));
        assert!(match_password(&after_tier, "secret123").await);
    }

    #[tokio::test]
    async fn test_update_password_unknown_user_is_not_found() {
        let pool = test_pool().await;

        let err = update_password(&pool, Uuid::new_v4(), "newsecret456")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
