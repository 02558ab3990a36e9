use crate::domain::{errors::DomainError, ContextDocument, Embedding};
use async_trait::async_trait;

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Documents nearest to `query` by vector similarity, closest first.
    async fn nearest(
        &self,
        query: &Embedding,
        limit: usize,
    ) -> Result<Vec<ContextDocument>, DomainError>;

    async fn ping(&self) -> Result<(), DomainError>;

    fn backend(&self) -> &'static str;
}
