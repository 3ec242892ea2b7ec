use async_trait::async_trait;

/// Speech synthesis interface over an external text-to-speech service.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` into raw audio bytes using the voice settings
    /// fixed at construction time.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("synthesis request failed: {0}")]
    RequestFailed(String),
    #[error("synthesis service returned status {status}: {body}")]
    ServiceStatus { status: u16, body: String },
    #[error("malformed synthesis response: {0}")]
    MalformedResponse(String),
}
