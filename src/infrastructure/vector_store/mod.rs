mod astra;
mod in_memory;
mod qdrant;

pub use astra::AstraVectorStore;
pub use in_memory::InMemoryVectorStore;
pub use qdrant::QdrantVectorStore;

use std::sync::Arc;

use crate::domain::{ports::VectorStore, DomainError};
use crate::infrastructure::config::VectorStoreConfig;

/// Builds the backend selected in the configuration.
pub fn from_config(
    config: &VectorStoreConfig,
    client: &reqwest::Client,
) -> Result<Arc<dyn VectorStore>, DomainError> {
    let store: Arc<dyn VectorStore> = match config {
        VectorStoreConfig::Astra {
            endpoint,
            namespace,
            token,
            collection,
        } => Arc::new(AstraVectorStore::new(
            client.clone(),
            endpoint,
            namespace,
            collection,
            token.clone(),
        )),
        VectorStoreConfig::Qdrant {
            url,
            collection,
            api_key,
        } => Arc::new(QdrantVectorStore::new(url, collection, api_key.clone())?),
        VectorStoreConfig::Memory => {
            tracing::warn!("VECTOR_STORE=memory: store starts empty, answers get no retrieved context");
            Arc::new(InMemoryVectorStore::new())
        }
    };
    Ok(store)
}
