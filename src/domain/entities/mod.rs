mod context;
mod conversation;
mod embedding;
mod generation;

pub use context::{join_context, ContextDocument};
pub use conversation::{Conversation, Message, MessageRole};
pub use embedding::Embedding;
pub use generation::GenerationFragment;
