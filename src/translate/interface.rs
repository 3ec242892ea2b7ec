use async_trait::async_trait;

/// Text translation interface over an external translation service.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into the language named by `target_lang`
    /// (an ISO 639-1 code, e.g. "en").
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("translation request failed: {0}")]
    RequestFailed(String),
    #[error("translation service returned status {status}: {body}")]
    ServiceStatus { status: u16, body: String },
    #[error("malformed translation response: {0}")]
    MalformedResponse(String),
}
