/**
 * Router Configuration
 *
 * Combines the API routes into the final Axum router with request
 * tracing and a 404 fallback.
 */

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(state: AppState) -> Router<()> {
    let router = Router::new();

    let router = configure_api_routes(router);

    let router = router.layer(TraceLayer::new_for_http());

    // Fallback handler for 404
    let router = router.fallback(|| async { "404 Not Found" });

    router.with_state(state)
}
