use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use super::types::{extract_translation, TextItem};
use crate::config::TranslatorConfig;
use crate::shared::error::{AppError, AppResult};

/// Anything that can turn text into the target language.
#[async_trait]
pub trait Translate: Send + Sync {
    async fn translate(&self, text: &str, target: &str) -> AppResult<String>;
}

/// Microsoft Translator over RapidAPI.
///
/// Exactly one attempt per call: no retry, no timeout, no cache.
pub struct TranslationClient {
    http: Client,
    config: TranslatorConfig,
}

impl TranslationClient {
    pub fn new(config: TranslatorConfig) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent("translator-widget/0.1")
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub(crate) fn build_request(&self, text: &str, target: &str) -> RequestBuilder {
        self.http
            .post(&self.config.endpoint)
            .query(&[
                ("to[0]", target),
                ("api-version", self.config.api_version.as_str()),
                ("profanityAction", self.config.profanity_action.as_str()),
                ("textType", self.config.text_type.as_str()),
            ])
            .header("X-RapidAPI-Key", &self.config.credentials.key)
            .header("X-RapidAPI-Host", &self.config.credentials.host)
            .json(&[TextItem { text }])
    }

    async fn fetch(&self, text: &str, target: &str) -> Result<String, String> {
        let response = self
            .build_request(text, target)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("service returned {}", status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| format!("failed to read body: {}", e))?;

        extract_translation(&body)
    }
}

#[async_trait]
impl Translate for TranslationClient {
    async fn translate(&self, text: &str, target: &str) -> AppResult<String> {
        if text.is_empty() {
            return Err(AppError::Validation("Missing text to translate".to_string()));
        }
        if target.is_empty() {
            return Err(AppError::Validation("Missing target language".to_string()));
        }

        log::info!("[Translator] Translating {} chars to '{}'", text.chars().count(), target);

        self.fetch(text, target).await.map_err(|reason| {
            log::error!("[Translator] Translation to '{}' failed: {}", target, reason);
            AppError::TranslationFailed
        })
    }
}
