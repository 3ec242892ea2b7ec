use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::asr::{CloudSpeechClient, SpeechToText};
use crate::audio_store::AudioStore;
use crate::config::Config;
use crate::translate::{CloudTranslateClient, Translator};
use crate::tts::{CloudSynthesisClient, SpeechSynthesizer};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub speech_to_text: Arc<dyn SpeechToText>,
    pub translator: Arc<dyn Translator>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub audio_store: Arc<AudioStore>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let api_key = std::env::var(&config.cloud.api_key_env).unwrap_or_default();
        if api_key.is_empty() {
            warn!(
                var = %config.cloud.api_key_env,
                "Cloud API key not set, upstream calls will be rejected"
            );
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.cloud.request_timeout_secs))
            .build()?;

        let audio_store = Arc::new(AudioStore::new(&config.storage.audio_dir)?);

        let speech_to_text = Arc::new(CloudSpeechClient::new(
            http.clone(),
            &config.cloud.speech_base_url,
            &api_key,
            config.transcription.clone(),
        ));
        let translator = Arc::new(CloudTranslateClient::new(
            http.clone(),
            &config.cloud.translate_base_url,
            &api_key,
        ));
        let synthesizer = Arc::new(CloudSynthesisClient::new(
            http,
            &config.cloud.tts_base_url,
            &api_key,
            config.synthesis.clone(),
        ));

        Ok(Self {
            config,
            speech_to_text,
            translator,
            synthesizer,
            audio_store,
        })
    }
}
