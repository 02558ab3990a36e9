/// Instruction block placed at the top of every prompt unless overridden
/// in the configuration file.
pub const DEFAULT_PREAMBLE: &str = "You are an AI assistant who knows everything about food recipes and their reviews.
Use the below CONTEXT and CONVERSATION HISTORY to help answer the user's question.
Format responses using Markdown, with proper line breaks, lists, and bold/italic formatting when needed.";

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    preamble: String,
}

impl PromptTemplate {
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
        }
    }

    /// Builds the generation prompt: instructions, context block, history
    /// block, then the question. Empty context or history still produce
    /// their (empty) blocks.
    pub fn compose(&self, context: &str, history: &str, question: &str) -> String {
        format!(
            "{preamble}\n\n\
             --------------\n\
             START CONTEXT:\n\
             {context}\n\
             END CONTEXT\n\
             --------------\n\n\
             CONVERSATION HISTORY:\n\
             {history}\n\n\
             QUESTION: {question}\n",
            preamble = self.preamble.trim_end(),
        )
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_PREAMBLE)
    }
}
