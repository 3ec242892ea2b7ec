use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::interface::{TranslationError, Translator};

/// Client for a cloud text translation REST endpoint.
#[derive(Debug, Clone)]
pub struct CloudTranslateClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslationList,
}

#[derive(Deserialize)]
struct TranslationList {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl CloudTranslateClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        let endpoint = format!(
            "{}/language/translate/v2",
            base_url.trim_end_matches('/')
        );
        Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Translator for CloudTranslateClient {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError> {
        let request = TranslateRequest {
            q: text,
            target: target_lang,
            format: "text",
        };

        debug!(chars = text.len(), target = target_lang, "Sending text for translation");

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslationError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranslationError::ServiceStatus { status, body });
        }

        let result: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

        let translation = result
            .data
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| {
                TranslationError::MalformedResponse("no translations in response".to_string())
            })?;

        info!(chars = translation.translated_text.len(), "Translation completed");

        Ok(translation.translated_text)
    }
}
