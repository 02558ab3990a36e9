use std::sync::Arc;

use crate::application::{ChatRelay, PromptTemplate};
use crate::domain::{ports::VectorStore, DomainError};
use crate::infrastructure::{http, vector_store, AppConfig, OllamaEmbedding, OllamaLlm};

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ChatRelay>,
    pub vector_store: Arc<dyn VectorStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(relay: ChatRelay, vector_store: Arc<dyn VectorStore>, config: AppConfig) -> Self {
        Self {
            relay: Arc::new(relay),
            vector_store,
            config: Arc::new(config),
        }
    }

    /// Builds the process-wide clients once and wires them into the relay.
    pub fn from_config(config: AppConfig) -> Result<Self, DomainError> {
        let settings = &config.config;
        let client = http::build_client(&settings.http)?;

        let vector_store = vector_store::from_config(&config.env.vector_store, &client)?;
        let embedding = Arc::new(OllamaEmbedding::from_config(
            client.clone(),
            &config.env.ollama_url,
            &settings.embedding,
        ));
        let llm = Arc::new(OllamaLlm::from_config(
            client,
            &config.env.ollama_url,
            &settings.llm,
        ));

        let relay = ChatRelay::new(embedding, vector_store.clone(), llm)
            .with_template(PromptTemplate::new(settings.prompts.preamble.clone()))
            .with_limits(
                settings.retrieval.fetch_limit,
                settings.retrieval.context_limit,
            );

        Ok(Self::new(relay, vector_store, config))
    }
}
