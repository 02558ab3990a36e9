pub mod config;
pub mod embedding;
pub mod http;
pub mod llm;
pub mod vector_store;

pub use config::{AppConfig, Config, ConfigError, EnvConfig, VectorStoreConfig};
pub use embedding::OllamaEmbedding;
pub use llm::OllamaLlm;
pub use vector_store::{AstraVectorStore, InMemoryVectorStore, QdrantVectorStore};
