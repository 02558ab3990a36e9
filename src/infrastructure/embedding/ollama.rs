use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};
use crate::infrastructure::config::EmbeddingConfig;
use crate::infrastructure::http::join_url;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

/// Embeddings from an Ollama server's `/api/embeddings` endpoint.
pub struct OllamaEmbedding {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaEmbedding {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            url: join_url(base_url, "api/embeddings"),
            model: EmbeddingConfig::default().model,
        }
    }

    pub fn from_config(client: reqwest::Client, base_url: &str, config: &EmbeddingConfig) -> Self {
        Self::new(client, base_url).with_model(&config.model)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl EmbeddingService for OllamaEmbedding {
    /// A reply without an `embedding` field gives an empty embedding.
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        let response = self
            .client
            .post(&self.url)
            .json(&EmbeddingRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await
            .map_err(|e| DomainError::external(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::external(e.to_string()))?;

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| DomainError::external(format!("malformed embedding reply: {e}")))?;

        Ok(Embedding::new(body.embedding))
    }
}
