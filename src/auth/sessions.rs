/**
 * Session Management and JWT Tokens
 *
 * Issues the two stateless session tokens minted at registration/login:
 *
 * - *Access token*: short TTL, returned in the JSON response body.
 * - *Refresh token*: long TTL, delivered only via the HTTP-only
 *   `refreshToken` cookie, never in a body.
 *
 * The two classes use distinct signing secrets, so compromising one does
 * not compromise the other. Nothing is persisted per token; sessions are
 * self-contained.
 */

use axum_extra::extract::cookie::Cookie;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::server::config::{AuthConfig, ConfigError};

/// Name of the refresh-token cookie
pub const REFRESH_COOKIE: &str = "refreshToken";

/// JWT claims carried by both token classes
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (UUID, stringified)
    pub id: String,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

impl Claims {
    /// Parse the user id out of the claims
    ///
    /// A malformed id classifies as a bad entity reference (404), matching
    /// the classifier's cast-failure rule.
    pub fn user_id(&self) -> Result<Uuid, ApiError> {
        Ok(Uuid::parse_str(&self.id)?)
    }
}

/// The pair of tokens issued together on successful authentication
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Short-lived token, returned in the response body
    pub access: String,
    /// Long-lived token, delivered only via the refresh cookie
    pub refresh: String,
}

/// Signs and verifies both token classes
///
/// Constructed once at startup from [`AuthConfig`] and injected through
/// application state; construction fails if either secret is empty, so an
/// unsigned or trivially-signed token can never be minted.
pub struct TokenIssuer {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    access_ttl_secs: u64,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    refresh_max_age_secs: u64,
}

impl TokenIssuer {
    /// Build an issuer from validated configuration
    ///
    /// # Errors
    ///
    /// Fails with a configuration error if either signing secret is empty.
    /// Signing with an empty key is never attempted.
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        if config.access_secret.is_empty() {
            return Err(ConfigError::Missing("ACCESS_SECRET"));
        }
        if config.refresh_secret.is_empty() {
            return Err(ConfigError::Missing("REFRESH_SECRET"));
        }

        Ok(Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            access_ttl_secs: config.access_ttl_secs,
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_max_age_secs: config.refresh_max_age_secs(),
        })
    }

    /// Issue an access/refresh token pair for a user
    pub fn issue(&self, user_id: Uuid) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp().unsigned_abs();

        let access = encode(
            &Header::default(),
            &Claims {
                id: user_id.to_string(),
                iat: now,
                exp: now + self.access_ttl_secs,
            },
            &self.access_encoding,
        )?;

        let refresh = encode(
            &Header::default(),
            &Claims {
                id: user_id.to_string(),
                iat: now,
                exp: now + self.refresh_max_age_secs,
            },
            &self.refresh_encoding,
        )?;

        Ok(TokenPair { access, refresh })
    }

    /// Verify and decode an access token
    pub fn verify_access(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.access_decoding, &Validation::default())?;
        Ok(data.claims)
    }

    /// Verify and decode a refresh token
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.refresh_decoding, &Validation::default())?;
        Ok(data.claims)
    }

    /// Build the refresh-token cookie
    ///
    /// HTTP-only (inaccessible to script), scoped to the whole site, with
    /// the configured max-age.
    pub fn refresh_cookie(&self, refresh_token: &str) -> Cookie<'static> {
        let max_age = i64::try_from(self.refresh_max_age_secs).unwrap_or(i64::MAX);
        Cookie::build((REFRESH_COOKIE, refresh_token.to_owned()))
            .path("/")
            .http_only(true)
            .max_age(time::Duration::seconds(max_age))
            .build()
    }

    /// Build the cookie that clears the refresh token
    pub fn clear_refresh_cookie() -> Cookie<'static> {
        Cookie::build((REFRESH_COOKIE, ""))
            .path("/")
            .http_only(true)
            .max_age(time::Duration::ZERO)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::config::AuthConfig;

    fn issuer() -> TokenIssuer {
        TokenIssuer::from_config(&AuthConfig::for_tests()).unwrap()
    }

    #[test]
    fn test_issue_token_pair() {
        let user_id = Uuid::new_v4();
        let pair = issuer().issue(user_id).unwrap();
        assert!(!pair.access.is_empty());
        assert!(!pair.refresh.is_empty());
        assert_ne!(pair.access, pair.refresh);
    }

    #[test]
    fn test_access_token_roundtrip() {
        let user_id = Uuid::new_v4();
        let issuer = issuer();
        let pair = issuer.issue(user_id).unwrap();

        let claims = issuer.verify_access(&pair.access).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_roundtrip() {
        let user_id = Uuid::new_v4();
        let issuer = issuer();
        let pair = issuer.issue(user_id).unwrap();

        let claims = issuer.verify_refresh(&pair.refresh).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_token_classes_use_distinct_secrets() {
        let issuer = issuer();
        let pair = issuer.issue(Uuid::new_v4()).unwrap();

        // An access token must not verify under the refresh key, nor the
        // other way around.
        assert!(issuer.verify_refresh(&pair.access).is_err());
        assert!(issuer.verify_access(&pair.refresh).is_err());
    }

    #[test]
    fn test_refresh_outlives_access() {
        let issuer = issuer();
        let pair = issuer.issue(Uuid::new_v4()).unwrap();

        let access = issuer.verify_access(&pair.access).unwrap();
        let refresh = issuer.verify_refresh(&pair.refresh).unwrap();
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let issuer = issuer();
        let pair = issuer.issue(Uuid::new_v4()).unwrap();
        let mut tampered = pair.access.clone();
        tampered.push('x');
        assert!(issuer.verify_access(&tampered).is_err());
        assert!(issuer.verify_access("invalid.token.here").is_err());
    }

    #[test]
    fn test_empty_secret_is_fatal() {
        let mut config = AuthConfig::for_tests();
        config.access_secret = String::new();
        assert!(TokenIssuer::from_config(&config).is_err());

        let mut config = AuthConfig::for_tests();
        config.refresh_secret = String::new();
        assert!(TokenIssuer::from_config(&config).is_err());
    }

    #[test]
    fn test_refresh_cookie_contract() {
        let issuer = issuer();
        let cookie = issuer.refresh_cookie("some-refresh-token");

        assert_eq!(cookie.name(), REFRESH_COOKIE);
        assert_eq!(cookie.value(), "some-refresh-token");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::seconds(
                AuthConfig::for_tests().refresh_max_age_secs() as i64
            ))
        );
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = TokenIssuer::clear_refresh_cookie();
        assert_eq!(cookie.name(), REFRESH_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }

    #[test]
    fn test_malformed_id_in_claims() {
        let claims = Claims {
            id: "not-a-uuid".to_string(),
            iat: 0,
            exp: 0,
        };
        assert!(claims.user_id().is_err());
    }
}
