use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{ports::VectorStore, ContextDocument, DomainError, Embedding};
use crate::infrastructure::http::join_url;

/// Collection access through the Astra DB Data API (JSON over HTTP).
pub struct AstraVectorStore {
    client: reqwest::Client,
    keyspace_url: String,
    collection_url: String,
    token: String,
}

#[derive(Serialize)]
struct FindCommand<'a> {
    find: FindBody<'a>,
}

#[derive(Serialize)]
struct FindBody<'a> {
    filter: serde_json::Value,
    sort: VectorSort<'a>,
    options: FindOptions,
}

#[derive(Serialize)]
struct VectorSort<'a> {
    #[serde(rename = "$vector")]
    vector: &'a [f32],
}

#[derive(Serialize)]
struct FindOptions {
    limit: usize,
}

#[derive(Deserialize)]
struct DataApiResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<DataApiError>,
}

#[derive(Deserialize)]
struct FoundDocuments {
    #[serde(default)]
    documents: Vec<ContextDocument>,
}

#[derive(Deserialize)]
struct DataApiError {
    #[serde(default)]
    message: String,
}

impl AstraVectorStore {
    pub fn new(
        client: reqwest::Client,
        endpoint: &str,
        namespace: &str,
        collection: &str,
        token: impl Into<String>,
    ) -> Self {
        let keyspace_url = join_url(endpoint, &format!("api/json/v1/{namespace}"));
        let collection_url = join_url(&keyspace_url, collection);
        Self {
            client,
            keyspace_url,
            collection_url,
            token: token.into(),
        }
    }

    /// Sends one Data API command. Errors reported in the reply body fail
    /// the call; the `data` section is returned as is.
    async fn command<T>(&self, url: &str, body: &impl Serialize) -> Result<Option<T>, DomainError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response: DataApiResponse<T> = self
            .client
            .post(url)
            .header("Token", &self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::external(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::external(e.to_string()))?
            .json()
            .await
            .map_err(|e| DomainError::external(format!("malformed Data API reply: {e}")))?;

        if !response.errors.is_empty() {
            let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
            return Err(DomainError::external(messages.join("; ")));
        }

        Ok(response.data)
    }
}

#[async_trait]
impl VectorStore for AstraVectorStore {
    async fn nearest(
        &self,
        query: &Embedding,
        limit: usize,
    ) -> Result<Vec<ContextDocument>, DomainError> {
        let command = FindCommand {
            find: FindBody {
                filter: json!({}),
                sort: VectorSort {
                    vector: query.as_slice(),
                },
                options: FindOptions { limit },
            },
        };

        let found: FoundDocuments = self
            .command(&self.collection_url, &command)
            .await?
            .ok_or_else(|| DomainError::external("Data API reply has no data"))?;
        Ok(found.documents)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.command::<serde_json::Value>(&self.keyspace_url, &json!({ "findCollections": {} }))
            .await
            .map(|_| ())
    }

    fn backend(&self) -> &'static str {
        "astra"
    }
}
