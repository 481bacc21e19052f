/**
 * Application State
 *
 * Shared state handed to every handler. Everything here is constructed
 * once during initialization and injected; handlers never reach into the
 * environment.
 */

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::sessions::TokenIssuer;
use crate::generate::client::TextGenerator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (credential store)
    pub pool: SqlitePool,
    /// Token issuer, built once from validated configuration
    pub tokens: Arc<TokenIssuer>,
    /// Generation provider; `None` when not configured
    pub generator: Option<Arc<dyn TextGenerator>>,
}

#[cfg(test)]
impl AppState {
    /// State over a fresh in-memory database, no generation provider
    pub(crate) async fn for_tests() -> Self {
        use crate::server::config::{test_pool, AuthConfig};

        Self {
            pool: test_pool().await,
            tokens: Arc::new(
                TokenIssuer::from_config(&AuthConfig::for_tests()).expect("test issuer"),
            ),
            generator: None,
        }
    }
}
