/**
 * Server Initialization
 *
 * Assembles the application from validated configuration:
 *
 * 1. Connect the database pool and run migrations
 * 2. Build the token issuer (fatal if a signing secret is missing)
 * 3. Build the generation client if a provider key is configured
 * 4. Create the router with all routes
 *
 * Unlike the optional generation provider, the database and the token
 * issuer are required: failing to initialize either aborts startup.
 */

use std::sync::Arc;

use axum::Router;
use thiserror::Error;

use crate::auth::sessions::TokenIssuer;
use crate::generate::client::{OpenAiClient, TextGenerator};
use crate::routes::router::create_router;
use crate::server::config::{connect_database, ConfigError, ServerConfig};
use crate::server::state::AppState;

/// Failures during application assembly, all fatal
#[derive(Debug, Error)]
pub enum InitError {
    /// Database connection or migration failure
    #[error("database initialization failed: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid token configuration (e.g. empty signing secret)
    #[error("token configuration rejected: {0}")]
    Tokens(#[from] ConfigError),
}

/// Create and configure the Axum application
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing textforge server");

    let pool = connect_database(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    let tokens = Arc::new(TokenIssuer::from_config(&config.auth)?);

    let generator = config
        .openai_api_key
        .map(|key| Arc::new(OpenAiClient::new(key)) as Arc<dyn TextGenerator>);
    if generator.is_none() {
        tracing::warn!("OPENAI_API_KEY not set. Generation endpoints will answer 503.");
    }

    let state = AppState {
        pool,
        tokens,
        generator,
    };

    Ok(create_router(state))
}
