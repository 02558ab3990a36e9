pub mod chunker;
pub mod prompt;
pub mod relay;

pub use chunker::{rechunk, WordChunker, WordStream};
pub use prompt::{PromptTemplate, DEFAULT_PREAMBLE};
pub use relay::{ChatRelay, DEFAULT_CONTEXT_LIMIT, DEFAULT_FETCH_LIMIT};
