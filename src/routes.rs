use axum::{
    extract::{Multipart, State},
    routing::{get, post},
    Router,
    Json,
    http::StatusCode,
};
use axum::body::Bytes;
use serde_json::{json, Value};
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check
        .route("/api/health", get(health_check))

        // REST API routes
        .route("/api/record_audio", post(record_audio))
        .route("/api/synthesize", post(synthesize))

        // Static file serving for synthesized audio
        .nest_service("/audio", ServeDir::new(state.audio_store.root()))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Accept a multipart audio upload, transcribe it, and translate the
/// transcript. The scratch copy of the upload is removed after the
/// transcription attempt whether or not it succeeded.
async fn record_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut audio_data: Option<Bytes> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audioData" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read audio data: {}", e)))?;
                audio_data = Some(data);
            }
            "fileName" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read file name: {}", e)))?;
                file_name = Some(text);
            }
            _ => {}
        }
    }

    let audio_data = audio_data.ok_or_else(|| bad_request("audioData field is required"))?;
    let file_name = file_name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| bad_request("fileName field is required"))?;

    let staged = state
        .audio_store
        .stage_upload(&file_name, &audio_data)
        .await
        .map_err(|e| {
            error!(error = %e, file_name = %file_name, "Failed to stage uploaded audio");
            internal_error("Failed to store uploaded audio")
        })?;

    let transcription = state.speech_to_text.transcribe(&audio_data).await;

    if let Err(e) = staged.remove().await {
        warn!(error = %e, "Failed to remove scratch upload");
    }

    let transcript = transcription.map_err(|e| {
        error!(error = %e, "Transcription failed");
        bad_gateway("Transcription service failed")
    })?;

    let translated = if transcript.is_empty() {
        info!("Transcription produced no text, skipping translation");
        String::new()
    } else {
        state
            .translator
            .translate(&transcript, &state.config.translation.target_language)
            .await
            .map_err(|e| {
                error!(error = %e, "Translation failed");
                bad_gateway("Translation service failed")
            })?
    };

    Ok(Json(json!({
        "message": "Audio processed successfully",
        "audioTranscription": transcript,
        "translatedText": translated,
    })))
}

/// Synthesize the supplied text to speech and respond with a URL where the
/// resulting audio file can be fetched.
async fn synthesize(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let text = payload
        .get("text")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| bad_request("text field is required"))?;

    let audio = state.synthesizer.synthesize(text).await.map_err(|e| {
        error!(error = %e, "Speech synthesis failed");
        bad_gateway("Speech synthesis service failed")
    })?;

    let file_name = state.audio_store.write_output(&audio).await.map_err(|e| {
        error!(error = %e, "Failed to write synthesized audio");
        internal_error("Failed to write synthesized audio")
    })?;

    let audio_url = format!(
        "{}/audio/{}",
        state.config.server.public_base_url.trim_end_matches('/'),
        file_name
    );

    Ok(Json(json!({ "audioURL": audio_url })))
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message.into() })),
    )
}

fn bad_gateway(message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({ "error": message.into() })),
    )
}

fn internal_error(message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message.into() })),
    )
}
