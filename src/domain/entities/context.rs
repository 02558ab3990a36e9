use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record returned by the document store. Only `text` is interpreted;
/// every other field is carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextDocument {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ContextDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }
}

/// Joins the text of the first `limit` documents, in the order given,
/// separated by a blank line.
pub fn join_context(documents: &[ContextDocument], limit: usize) -> String {
    documents
        .iter()
        .take(limit)
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
