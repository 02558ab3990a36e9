use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::application::services::chunker::{rechunk, WordStream};
use crate::application::services::prompt::PromptTemplate;
use crate::domain::{
    join_context,
    ports::{EmbeddingService, LlmService, VectorStore},
    Conversation, DomainError, Embedding,
};

pub const DEFAULT_FETCH_LIMIT: usize = 5;
pub const DEFAULT_CONTEXT_LIMIT: usize = 3;

/// Answers a conversation by grounding its latest message in retrieved
/// documents and relaying the generated text as a word stream.
pub struct ChatRelay {
    embedding: Arc<dyn EmbeddingService>,
    vector_store: Arc<dyn VectorStore>,
    llm: Arc<dyn LlmService>,
    template: PromptTemplate,
    fetch_limit: usize,
    context_limit: usize,
}

impl ChatRelay {
    pub fn new(
        embedding: Arc<dyn EmbeddingService>,
        vector_store: Arc<dyn VectorStore>,
        llm: Arc<dyn LlmService>,
    ) -> Self {
        Self {
            embedding,
            vector_store,
            llm,
            template: PromptTemplate::default(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            context_limit: DEFAULT_CONTEXT_LIMIT,
        }
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_limits(mut self, fetch_limit: usize, context_limit: usize) -> Self {
        self.fetch_limit = fetch_limit;
        self.context_limit = context_limit;
        self
    }

    /// Embedding of the question, or an empty one if the service failed.
    #[instrument(skip(self, question))]
    pub async fn embed_question(&self, question: &str) -> Embedding {
        match self.embedding.embed(question).await {
            Ok(embedding) => {
                if embedding.is_empty() {
                    debug!("embedding service returned no vector");
                }
                embedding
            }
            Err(e) => {
                error!(error = %e, "Error generating embedding");
                Embedding::empty()
            }
        }
    }

    /// Text of the nearest documents. Empty when there is no embedding or
    /// the store could not be queried.
    #[instrument(skip(self, embedding), fields(dimension = embedding.dimension()))]
    pub async fn retrieve_context(&self, embedding: &Embedding) -> String {
        if embedding.is_empty() {
            return String::new();
        }

        match self.vector_store.nearest(embedding, self.fetch_limit).await {
            Ok(documents) => {
                debug!(found = documents.len(), "retrieved context documents");
                join_context(&documents, self.context_limit)
            }
            Err(e) => {
                error!(error = %e, backend = self.vector_store.backend(), "Error querying vector store");
                String::new()
            }
        }
    }

    /// Builds the generation prompt for a conversation. Only an empty
    /// conversation fails; upstream trouble degrades the context instead.
    #[instrument(skip(self, conversation), fields(messages = conversation.messages.len()))]
    pub async fn prepare_prompt(&self, conversation: &Conversation) -> Result<String, DomainError> {
        let history = conversation.history_summary();
        let question = conversation.latest_message()?;

        let embedding = self.embed_question(question).await;
        let context = self.retrieve_context(&embedding).await;

        Ok(self.template.compose(&context, &history, question))
    }

    /// Runs the whole pipeline. Errors are only returned before any output
    /// has been produced.
    #[instrument(skip(self, conversation))]
    pub async fn relay(&self, conversation: &Conversation) -> Result<WordStream, DomainError> {
        let prompt = self.prepare_prompt(conversation).await?;
        let upstream = self.llm.generate_stream(&prompt).await?;
        info!(prompt_len = prompt.len(), "streaming generation");
        Ok(rechunk(upstream))
    }
}
