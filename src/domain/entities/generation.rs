use serde::Deserialize;

/// One newline-delimited record of a streaming generation reply. Nothing
/// beyond an optional `response` string is assumed about its shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerationFragment {
    #[serde(default)]
    pub response: Option<String>,
}

impl GenerationFragment {
    pub fn parse(record: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(record)
    }

    /// The text carried by this fragment, if any.
    pub fn text(&self) -> Option<&str> {
        self.response.as_deref().filter(|s| !s.is_empty())
    }
}
