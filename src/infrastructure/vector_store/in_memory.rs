use async_trait::async_trait;
use serde_json::json;
use std::sync::RwLock;

use crate::domain::{ports::VectorStore, ContextDocument, DomainError, Embedding};

/// Brute-force cosine search over documents held in process memory.
pub struct InMemoryVectorStore {
    documents: RwLock<Vec<(ContextDocument, Embedding)>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }

    pub fn insert(&self, document: ContextDocument, embedding: Embedding) -> Result<(), DomainError> {
        self.documents
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?
            .push((document, embedding));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn nearest(
        &self,
        query: &Embedding,
        limit: usize,
    ) -> Result<Vec<ContextDocument>, DomainError> {
        let store = self
            .documents
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let mut scored: Vec<(&ContextDocument, f32)> = store
            .iter()
            .map(|(doc, embedding)| (doc, query.cosine_similarity(embedding)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(doc, score)| doc.clone().with_field("$similarity", json!(score)))
            .collect())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
