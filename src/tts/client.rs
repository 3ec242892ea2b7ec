use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SynthesisConfig;
use super::interface::{SpeechSynthesizer, SynthesisError};

/// Client for a cloud text-to-speech REST endpoint.
///
/// The service returns audio base64-encoded; the client decodes it so the
/// caller only ever sees raw bytes.
#[derive(Debug, Clone)]
pub struct CloudSynthesisClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    settings: SynthesisConfig,
}

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig<'a>,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
    ssml_gender: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig<'a> {
    audio_encoding: &'a str,
}

#[derive(Deserialize)]
struct SynthesizeResponse {
    #[serde(rename = "audioContent")]
    audio_content: String,
}

impl CloudSynthesisClient {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: &str,
        settings: SynthesisConfig,
    ) -> Self {
        let endpoint = format!("{}/v1/text:synthesize", base_url.trim_end_matches('/'));
        Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            settings,
        }
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for CloudSynthesisClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        let request = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: &self.settings.language_code,
                name: &self.settings.voice_name,
                ssml_gender: &self.settings.ssml_gender,
            },
            audio_config: AudioConfig {
                audio_encoding: &self.settings.audio_encoding,
            },
        };

        debug!(chars = text.len(), voice = %self.settings.voice_name, "Sending text for synthesis");

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| SynthesisError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SynthesisError::ServiceStatus { status, body });
        }

        let result: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::MalformedResponse(e.to_string()))?;

        let audio = STANDARD
            .decode(result.audio_content.as_bytes())
            .map_err(|e| {
                SynthesisError::MalformedResponse(format!("invalid audio content encoding: {}", e))
            })?;

        info!(bytes = audio.len(), "Speech synthesis completed");

        Ok(audio)
    }
}
