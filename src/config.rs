use serde::{Deserialize, Serialize};
use std::fs;
use anyhow::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    #[serde(default)]
    pub cloud: CloudConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base URL clients use to fetch synthesized audio files.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Exact origin allowed by CORS; permissive when unset.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: Option<String>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding scratch uploads and served synthesis output.
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,
}

/// Fixed recognition settings sent with every transcription request.
/// Callers cannot override these per upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    #[serde(default = "default_audio_encoding")]
    pub encoding: String,
    #[serde(default = "default_sample_rate_hertz")]
    pub sample_rate_hertz: u32,
    #[serde(default = "default_source_language")]
    pub language_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "default_target_language")]
    pub target_language: String,
}

/// Fixed voice settings sent with every synthesis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    #[serde(default = "default_voice_language")]
    pub language_code: String,
    #[serde(default = "default_voice_name")]
    pub voice_name: String,
    #[serde(default = "default_voice_gender")]
    pub ssml_gender: String,
    #[serde(default = "default_output_encoding")]
    pub audio_encoding: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    #[serde(default = "default_speech_base_url")]
    pub speech_base_url: String,
    #[serde(default = "default_translate_base_url")]
    pub translate_base_url: String,
    #[serde(default = "default_tts_base_url")]
    pub tts_base_url: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_retention_max_age_secs")]
    pub max_age_secs: u64,
    #[serde(default = "default_retention_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_public_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_cors_origin() -> Option<String> {
    Some("http://localhost:3000".to_string())
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_audio_dir() -> String {
    "audio".to_string()
}

fn default_audio_encoding() -> String {
    "WEBM_OPUS".to_string()
}

fn default_sample_rate_hertz() -> u32 {
    48000
}

fn default_source_language() -> String {
    "es-ES".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_voice_language() -> String {
    "en-US".to_string()
}

fn default_voice_name() -> String {
    "en-US-Wavenet-D".to_string()
}

fn default_voice_gender() -> String {
    "MALE".to_string()
}

fn default_output_encoding() -> String {
    "LINEAR16".to_string()
}

fn default_speech_base_url() -> String {
    "https://speech.googleapis.com".to_string()
}

fn default_translate_base_url() -> String {
    "https://translation.googleapis.com".to_string()
}

fn default_tts_base_url() -> String {
    "https://texttospeech.googleapis.com".to_string()
}

fn default_api_key_env() -> String {
    "CLOUD_API_KEY".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_retention_max_age_secs() -> u64 {
    3600
}

fn default_retention_sweep_interval_secs() -> u64 {
    300
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_base_url: default_public_base_url(),
            cors_origin: default_cors_origin(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            encoding: default_audio_encoding(),
            sample_rate_hertz: default_sample_rate_hertz(),
            language_code: default_source_language(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            target_language: default_target_language(),
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            language_code: default_voice_language(),
            voice_name: default_voice_name(),
            ssml_gender: default_voice_gender(),
            audio_encoding: default_output_encoding(),
        }
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            speech_base_url: default_speech_base_url(),
            translate_base_url: default_translate_base_url(),
            tts_base_url: default_tts_base_url(),
            api_key_env: default_api_key_env(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_age_secs: default_retention_max_age_secs(),
            sweep_interval_secs: default_retention_sweep_interval_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_default_config() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.transcription.encoding, "WEBM_OPUS");
        assert_eq!(config.translation.target_language, "en");
        assert!(!config.retention.enabled);
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let yaml = r#"
server:
  port: 8080
translation:
  target_language: de
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.translation.target_language, "de");
        assert_eq!(config.synthesis.voice_name, "en-US-Wavenet-D");
    }
}
