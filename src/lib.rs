//! Streaming chat relay for the recipe assistant.
//!
//! A conversation comes in over HTTP, its latest message is grounded in
//! documents retrieved from a vector store, and the generated answer is
//! streamed back word by word.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
