use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::TranscriptionConfig;
use super::interface::{SpeechToText, TranscriptionError};

/// Client for a cloud speech recognition REST endpoint.
///
/// Audio is sent base64-encoded in the request body with the recognition
/// settings fixed at construction time.
#[derive(Debug, Clone)]
pub struct CloudSpeechClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    settings: TranscriptionConfig,
}

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    config: RecognizeConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeConfig<'a> {
    encoding: &'a str,
    sample_rate_hertz: u32,
    language_code: &'a str,
}

#[derive(Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Deserialize)]
struct RecognitionAlternative {
    #[serde(default)]
    transcript: String,
}

impl CloudSpeechClient {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: &str,
        settings: TranscriptionConfig,
    ) -> Self {
        let endpoint = format!("{}/v1/speech:recognize", base_url.trim_end_matches('/'));
        Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            settings,
        }
    }
}

#[async_trait::async_trait]
impl SpeechToText for CloudSpeechClient {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError> {
        let request = RecognizeRequest {
            config: RecognizeConfig {
                encoding: &self.settings.encoding,
                sample_rate_hertz: self.settings.sample_rate_hertz,
                language_code: &self.settings.language_code,
            },
            audio: RecognitionAudio {
                content: STANDARD.encode(audio),
            },
        };

        debug!(bytes = audio.len(), endpoint = %self.endpoint, "Sending audio for transcription");

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ServiceStatus { status, body });
        }

        let result: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::MalformedResponse(e.to_string()))?;

        let transcript = result
            .results
            .iter()
            .filter_map(|r| r.alternatives.first())
            .map(|a| a.transcript.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        info!(chars = transcript.len(), "Transcription completed");

        Ok(transcript)
    }
}
