use async_trait::async_trait;

/// Speech-to-text interface over an external transcription service.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe a complete audio clip held in memory.
    ///
    /// Returns the transcript as one string, joining the best alternative
    /// of each recognized segment with single spaces. An empty string means
    /// the service recognized no speech; failures are typed errors so the
    /// two cases stay distinguishable.
    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription request failed: {0}")]
    RequestFailed(String),
    #[error("transcription service returned status {status}: {body}")]
    ServiceStatus { status: u16, body: String },
    #[error("malformed transcription response: {0}")]
    MalformedResponse(String),
}
