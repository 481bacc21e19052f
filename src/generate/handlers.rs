/**
 * Text Generation Handlers
 *
 * Proxy handlers for the generation endpoints:
 *
 * - `POST /api/ai/run` - free-form prompt, returns `{text}`
 * - `POST /api/ai/summary` - summarize `text`, returns the content string
 * - `POST /api/ai/paragraph` - expand `text` into a paragraph
 * - `POST /api/ai/chatbot` - conversational reply to `text`
 * - `POST /api/ai/jsconverter` - turn `text` into JavaScript code
 * - `POST /api/ai/scifi-image` - sci-fi image of `text`, returns a URL
 *
 * Each text endpoint fixes its own system instruction and tuning; `run`
 * sends the user prompt with no system instruction at all.
 *
 * These deliberately keep the collaborator's simple error shape
 * (`{message, error}` with 400/500) and do not route through the auth
 * error classifier. The generator is an optional service: when it is not
 * configured the endpoints answer 503.
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

use crate::generate::client::{GeneratorError, TextGenerator, Tuning};
use crate::server::state::AppState;

/// Request body for the generation endpoints
///
/// `run` reads `prompt`; the others read `text`.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct GenerateRequest {
    /// Free-form prompt (run endpoint)
    #[serde(default)]
    pub prompt: String,
    /// Input text (all other endpoints)
    #[serde(default)]
    pub text: String,
}

/// Response body for the run endpoint
#[derive(Serialize, Debug)]
pub struct GenerateResponse {
    /// Generated text
    pub text: String,
}

type GenFailure = (StatusCode, Json<serde_json::Value>);

fn missing_field(message: &str) -> GenFailure {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "message": message })),
    )
}

fn generator_of(state: &AppState) -> Result<Arc<dyn TextGenerator>, GenFailure> {
    state.generator.clone().ok_or_else(|| {
        tracing::error!("Generation endpoint hit but no provider is configured");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "message": "Text generation is not configured" })),
        )
    })
}

fn provider_failure(err: GeneratorError) -> GenFailure {
    tracing::error!("generation request failed: {:?}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "message": "Error generating content",
            "error": err.to_string(),
        })),
    )
}

/// Shared shape of the `text`-driven completion endpoints
async fn proxy_completion(
    state: &AppState,
    request: &GenerateRequest,
    system: &str,
    tuning: Tuning,
) -> Result<Json<String>, GenFailure> {
    if request.text.is_empty() {
        return Err(missing_field("Text is required"));
    }
    let generator = generator_of(state)?;

    let content = generator
        .complete(Some(system), &request.text, tuning)
        .await
        .map_err(provider_failure)?;

    Ok(Json(content))
}

/// Free-form generation: `{prompt}` in, `{text}` out
///
/// The prompt goes to the provider alone, with no system instruction.
pub async fn run(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, GenFailure> {
    if request.prompt.is_empty() {
        return Err(missing_field("Prompt is required"));
    }
    let generator = generator_of(&state)?;

    let text = generator
        .complete(None, &request.prompt, Tuning::default())
        .await
        .map_err(provider_failure)?;

    Ok(Json(GenerateResponse { text }))
}

/// Summarize `text`; the response body is the content string itself
pub async fn summary(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<String>, GenFailure> {
    proxy_completion(&state, &request, "Summarize this", Tuning::default()).await
}

/// Expand `text` into a detailed paragraph
pub async fn paragraph(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<String>, GenFailure> {
    proxy_completion(
        &state,
        &request,
        "Write a detailed paragraph about this",
        Tuning::default(),
    )
    .await
}

/// Conversational reply to `text`
pub async fn chatbot(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<String>, GenFailure> {
    proxy_completion(
        &state,
        &request,
        "Chat with the user",
        Tuning {
            max_tokens: 300,
            temperature: 0.7,
        },
    )
    .await
}

/// Turn the instructions in `text` into JavaScript code
pub async fn jsconverter(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<String>, GenFailure> {
    proxy_completion(
        &state,
        &request,
        "Convert these instructions into JavaScript code",
        Tuning {
            max_tokens: 400,
            temperature: 0.25,
        },
    )
    .await
}

/// Generate a sci-fi image of `text`; the response body is the image URL
pub async fn scifi_image(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<String>, GenFailure> {
    if request.text.is_empty() {
        return Err(missing_field("Text is required"));
    }
    let generator = generator_of(&state)?;

    let url = generator
        .image(&format!("Generate a sci-fi image of {}", request.text))
        .await
        .map_err(provider_failure)?;

    Ok(Json(url))
}
