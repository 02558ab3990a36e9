use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::errors::DomainError;

/// Raw body of a streaming generation reply, chunked however the transport
/// delivered it.
pub type ByteStream = BoxStream<'static, Result<Bytes, DomainError>>;

#[async_trait]
pub trait LlmService: Send + Sync {
    /// Starts a streaming generation. Fails only if the request itself
    /// could not be made or was rejected.
    async fn generate_stream(&self, prompt: &str) -> Result<ByteStream, DomainError>;
}
