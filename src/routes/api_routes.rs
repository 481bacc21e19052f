/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 * - `POST /api/auth/logout` - Clear the refresh cookie
 *
 * ## Generation
 * - `POST /api/ai/run` - Free-form prompt
 * - `POST /api/ai/summary` - Summarize text
 * - `POST /api/ai/paragraph` - Expand text into a paragraph
 * - `POST /api/ai/chatbot` - Conversational reply
 * - `POST /api/ai/jsconverter` - Instructions to JavaScript code
 * - `POST /api/ai/scifi-image` - Sci-fi image URL
 */

use axum::Router;

use crate::auth::{login, logout, register};
use crate::generate::{chatbot, jsconverter, paragraph, run, scifi_image, summary};
use crate::server::state::AppState;

/// Configure API routes
///
/// All routes are public; the access token issued at login is intended
/// for per-request authorization by callers, but no route here requires
/// it.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/auth/register", axum::routing::post(register))
        .route("/api/auth/login", axum::routing::post(login))
        .route("/api/auth/logout", axum::routing::post(logout))
        // Generation endpoints
        .route("/api/ai/run", axum::routing::post(run))
        .route("/api/ai/summary", axum::routing::post(summary))
        .route("/api/ai/paragraph", axum::routing::post(paragraph))
        .route("/api/ai/chatbot", axum::routing::post(chatbot))
        .route("/api/ai/jsconverter", axum::routing::post(jsconverter))
        .route("/api/ai/scifi-image", axum::routing::post(scifi_image))
}
