// Mock upstream services shared by the integration tests
#![allow(dead_code)]

use std::{
    convert::Infallible,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use futures::stream;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use recipe_chat::infrastructure::{AppConfig, Config, EnvConfig, VectorStoreConfig};

/// Binds an ephemeral port and serves `app` on it for the rest of the test.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server address");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("Mock server error: {}", e);
        }
    });

    format!("http://{}", addr)
}

/// Ollama stand-in: `/api/embeddings` and streaming `/api/generate`.
#[derive(Clone)]
pub struct MockOllama {
    /// `None` makes the embedding endpoint answer 500.
    pub embedding: Option<Vec<f32>>,
    /// Body chunks of the generation reply, sent one by one.
    pub reads: Vec<String>,
    pub generate_status: StatusCode,
    pub prompts: Arc<Mutex<Vec<Value>>>,
    pub embed_calls: Arc<AtomicUsize>,
}

impl MockOllama {
    pub fn new(embedding: Option<Vec<f32>>, reads: &[&str]) -> Self {
        Self {
            embedding,
            reads: reads.iter().map(|r| r.to_string()).collect(),
            generate_status: StatusCode::OK,
            prompts: Arc::new(Mutex::new(Vec::new())),
            embed_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_generation(mut self, status: StatusCode) -> Self {
        self.generate_status = status;
        self
    }

    pub async fn start(&self) -> String {
        let app = Router::new()
            .route("/api/embeddings", post(embeddings_handler))
            .route("/api/generate", post(generate_handler))
            .with_state(self.clone());
        spawn_server(app).await
    }

    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }

    /// Body of the last generation request.
    pub fn last_generate_request(&self) -> Value {
        self.prompts
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or(Value::Null)
    }

    pub fn last_prompt(&self) -> String {
        self.last_generate_request()["prompt"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

async fn embeddings_handler(State(mock): State<MockOllama>, Json(body): Json<Value>) -> Response {
    mock.embed_calls.fetch_add(1, Ordering::SeqCst);
    if body["model"] != "nomic-embed-text" || !body["prompt"].is_string() {
        return (StatusCode::BAD_REQUEST, "unexpected embedding request").into_response();
    }

    match &mock.embedding {
        Some(vector) => Json(json!({ "embedding": vector })).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded").into_response(),
    }
}

async fn generate_handler(State(mock): State<MockOllama>, Json(body): Json<Value>) -> Response {
    mock.prompts.lock().unwrap().push(body);

    if mock.generate_status != StatusCode::OK {
        return (mock.generate_status, "generation failed").into_response();
    }

    let reads: Vec<Result<Bytes, Infallible>> = mock
        .reads
        .iter()
        .map(|r| Ok(Bytes::from(r.clone())))
        .collect();

    Response::builder()
        .header("content-type", "application/x-ndjson")
        .body(Body::from_stream(stream::iter(reads)))
        .unwrap()
}

/// Astra Data API stand-in serving a fixed document list.
#[derive(Clone)]
pub struct MockAstra {
    pub documents: Vec<Value>,
    pub errors: Option<Value>,
    pub requests: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

impl MockAstra {
    pub fn new(documents: Vec<Value>) -> Self {
        Self {
            documents,
            errors: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_errors(mut self, errors: Value) -> Self {
        self.errors = Some(errors);
        self
    }

    pub async fn start(&self) -> String {
        let app = Router::new()
            .route("/api/json/v1/{namespace}", post(keyspace_handler))
            .route("/api/json/v1/{namespace}/{collection}", post(find_handler))
            .with_state(self.clone());
        spawn_server(app).await
    }

    pub fn requests(&self) -> Vec<(String, Option<String>, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

fn record(mock: &MockAstra, path: String, headers: &HeaderMap, body: Value) {
    let token = headers
        .get("Token")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    mock.requests.lock().unwrap().push((path, token, body));
}

async fn keyspace_handler(
    State(mock): State<MockAstra>,
    Path(namespace): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    record(&mock, namespace, &headers, body);
    match &mock.errors {
        Some(errors) => Json(json!({ "errors": errors })),
        None => Json(json!({ "status": { "collections": ["recipe_docs"] } })),
    }
}

async fn find_handler(
    State(mock): State<MockAstra>,
    Path((namespace, collection)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    record(&mock, format!("{namespace}/{collection}"), &headers, body.clone());

    if let Some(errors) = &mock.errors {
        return Json(json!({ "errors": errors }));
    }

    let limit = body["find"]["options"]["limit"].as_u64().unwrap_or(20) as usize;
    let documents: Vec<Value> = mock.documents.iter().take(limit).cloned().collect();
    Json(json!({ "data": { "documents": documents, "nextPageState": null } }))
}

pub fn memory_config(ollama_url: &str) -> AppConfig {
    let env = EnvConfig {
        server: Default::default(),
        ollama_url: ollama_url.to_string(),
        vector_store: VectorStoreConfig::Memory,
    };
    AppConfig::new(env, Config::default()).unwrap()
}

pub fn astra_config(ollama_url: &str, astra_url: &str) -> AppConfig {
    let env = EnvConfig {
        server: Default::default(),
        ollama_url: ollama_url.to_string(),
        vector_store: VectorStoreConfig::Astra {
            endpoint: astra_url.to_string(),
            namespace: "recipes".into(),
            token: "AstraCS:test-token".into(),
            collection: "recipe_docs".into(),
        },
    };
    AppConfig::new(env, Config::default()).unwrap()
}

pub fn chat_request(messages: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "messages": messages }).to_string()))
        .unwrap()
}

/// Sends one request through the router and returns status, content type
/// and the full body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, String, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, String::from_utf8_lossy(&body).into_owned())
}
