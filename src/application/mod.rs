//! Application layer - the chat relay pipeline.
//!
//! Services here depend on domain ports (traits) rather than concrete
//! clients, so the pipeline can be exercised with in-process fakes.

pub mod services;

pub use services::{ChatRelay, PromptTemplate, WordChunker, WordStream};
