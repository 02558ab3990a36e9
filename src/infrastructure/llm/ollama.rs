use async_trait::async_trait;
use futures::StreamExt;
use serde::Serialize;

use crate::domain::{
    ports::{ByteStream, LlmService},
    DomainError,
};
use crate::infrastructure::config::LlmConfig;
use crate::infrastructure::http::join_url;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Streaming text generation against an Ollama server's `/api/generate`.
pub struct OllamaLlm {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaLlm {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            url: join_url(base_url, "api/generate"),
            model: LlmConfig::default().model,
        }
    }

    pub fn from_config(client: reqwest::Client, base_url: &str, config: &LlmConfig) -> Self {
        Self::new(client, base_url).with_model(&config.model)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl LlmService for OllamaLlm {
    async fn generate_stream(&self, prompt: &str) -> Result<ByteStream, DomainError> {
        let response = self
            .client
            .post(&self.url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: true,
            })
            .send()
            .await
            .map_err(|e| DomainError::external(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::external(e.to_string()))?;

        tracing::debug!(model = %self.model, status = %response.status(), "generation started");

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| DomainError::external(e.to_string())))
            .boxed())
    }
}
