use async_trait::async_trait;
use qdrant_client::qdrant::{ScoredPoint, SearchPointsBuilder};
use qdrant_client::Qdrant;
use serde_json::json;

use crate::domain::{ports::VectorStore, ContextDocument, DomainError, Embedding};

/// Payload key holding the document text.
const TEXT_FIELD: &str = "text";

pub struct QdrantVectorStore {
    client: Qdrant,
    collection: String,
}

impl QdrantVectorStore {
    pub fn new(url: &str, collection: &str, api_key: Option<String>) -> Result<Self, DomainError> {
        let client = Qdrant::from_url(url)
            .api_key(api_key)
            .build()
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(Self {
            client,
            collection: collection.to_string(),
        })
    }

    fn to_document(point: ScoredPoint) -> Option<ContextDocument> {
        let text = point.payload.get(TEXT_FIELD)?.as_str()?.to_string();
        Some(ContextDocument::new(text).with_field("$similarity", json!(point.score)))
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn nearest(
        &self,
        query: &Embedding,
        limit: usize,
    ) -> Result<Vec<ContextDocument>, DomainError> {
        let results = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, query.as_slice().to_vec(), limit as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        let total = results.result.len();
        let documents: Vec<ContextDocument> = results
            .result
            .into_iter()
            .filter_map(Self::to_document)
            .collect();

        if documents.len() < total {
            tracing::warn!(
                skipped = total - documents.len(),
                collection = %self.collection,
                "points without a text payload"
            );
        }

        Ok(documents)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.client
            .health_check()
            .await
            .map(|_| ())
            .map_err(|e| DomainError::external(e.to_string()))
    }

    fn backend(&self) -> &'static str {
        "qdrant"
    }
}
