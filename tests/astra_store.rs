mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use serde_json::json;

use common::{astra_config, chat_request, send, MockAstra, MockOllama};
use recipe_chat::api::{create_router, AppState};
use recipe_chat::domain::{ports::VectorStore, DomainError, Embedding};
use recipe_chat::infrastructure::AstraVectorStore;

const REPLY: &[&str] = &["{\"response\":\"Use gochujang.\"}\n", "{\"done\":true}\n"];

fn recipe_docs(n: usize) -> Vec<serde_json::Value> {
    (1..=n)
        .map(|i| json!({ "_id": format!("doc-{i}"), "text": format!("recipe note {i}"), "$similarity": 1.0 - i as f64 / 10.0 }))
        .collect()
}

#[tokio::test]
async fn test_find_sends_vector_sort_and_token() {
    let astra = MockAstra::new(recipe_docs(7));
    let url = astra.start().await;
    let store = AstraVectorStore::new(
        reqwest::Client::new(),
        &url,
        "recipes",
        "recipe_docs",
        "AstraCS:test-token",
    );

    let documents = store
        .nearest(&Embedding::new(vec![0.5, 0.25]), 5)
        .await
        .unwrap();

    assert_eq!(documents.len(), 5);
    assert_eq!(documents[0].text, "recipe note 1");
    assert_eq!(documents[0].fields["_id"], "doc-1");

    let requests = astra.requests();
    let (path, token, body) = &requests[0];
    assert_eq!(path, "recipes/recipe_docs");
    assert_eq!(token.as_deref(), Some("AstraCS:test-token"));
    assert_eq!(
        body,
        &json!({
            "find": {
                "filter": {},
                "sort": { "$vector": [0.5, 0.25] },
                "options": { "limit": 5 }
            }
        })
    );
}

#[tokio::test]
async fn test_data_api_errors_fail_the_query() {
    let astra = MockAstra::new(recipe_docs(3))
        .with_errors(json!([{ "message": "Collection does not exist", "errorCode": "COLLECTION_NOT_EXIST" }]));
    let url = astra.start().await;
    let store = AstraVectorStore::new(reqwest::Client::new(), &url, "recipes", "missing", "t");

    let err = store
        .nearest(&Embedding::new(vec![1.0]), 5)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::ExternalService(ref m) if m.contains("Collection does not exist")));
}

#[tokio::test]
async fn test_configured_pipeline_uses_first_three_of_five() {
    let astra = MockAstra::new(recipe_docs(5));
    let astra_url = astra.start().await;
    let ollama = MockOllama::new(Some(vec![0.1, 0.2, 0.3]), REPLY);
    let ollama_url = ollama.start().await;

    let state = AppState::from_config(astra_config(&ollama_url, &astra_url)).unwrap();
    let (status, _, body) = send(
        create_router(state),
        chat_request(json!([{ "role": "user", "content": "How do I make bibimbap sauce?" }])),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Use gochujang. ");

    let (_, _, find) = &astra.requests()[0];
    assert_eq!(find["find"]["options"]["limit"], 5);

    let prompt = ollama.last_prompt();
    assert!(prompt.contains("recipe note 1\n\nrecipe note 2\n\nrecipe note 3\nEND CONTEXT"));
    assert!(!prompt.contains("recipe note 4"));
}

#[tokio::test]
async fn test_retrieval_failure_degrades_to_empty_context() {
    let astra = MockAstra::new(vec![]).with_errors(json!([{ "message": "Unauthorized" }]));
    let astra_url = astra.start().await;
    let ollama = MockOllama::new(Some(vec![0.1, 0.2]), REPLY);
    let ollama_url = ollama.start().await;

    let state = AppState::from_config(astra_config(&ollama_url, &astra_url)).unwrap();
    let (status, _, body) = send(
        create_router(state),
        chat_request(json!([{ "role": "user", "content": "What is kimchi?" }])),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Use gochujang. ");
    assert!(ollama
        .last_prompt()
        .contains("START CONTEXT:\n\nEND CONTEXT"));
}

#[tokio::test]
async fn test_readiness_reports_unreachable_store() {
    let astra = MockAstra::new(vec![]).with_errors(json!([{ "message": "Unauthorized" }]));
    let astra_url = astra.start().await;

    let state = AppState::from_config(astra_config("http://127.0.0.1:1", &astra_url)).unwrap();
    let request = Request::builder().uri("/ready").body(Body::empty()).unwrap();
    let (status, _, body) = send(create_router(state), request).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("\"vector_store\":\"disconnected\""));
    assert!(body.contains("\"backend\":\"astra\""));
}
