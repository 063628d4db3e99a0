mod common;

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use spotifyou::{
    config::GeminiSettings,
    error::RecommendationError,
    recommend::{GeminiClient, Recommender, TextGenerator},
};

#[derive(Clone)]
struct MockGemini {
    reply: (u16, Value),
    seen: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

impl MockGemini {
    fn new(status: u16, body: Value) -> Self {
        Self {
            reply: (status, body),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[derive(serde::Deserialize)]
struct KeyQuery {
    key: Option<String>,
}

async fn generate(
    State(state): State<MockGemini>,
    Path(rest): Path<String>,
    Query(query): Query<KeyQuery>,
    Json(body): Json<Value>,
) -> Response {
    state.seen.lock().unwrap().push((rest, query.key, body));
    let (status, reply) = state.reply.clone();
    (StatusCode::from_u16(status).unwrap(), Json(reply)).into_response()
}

async fn spawn_gemini(state: MockGemini) -> String {
    let app = Router::new()
        .route("/models/{*rest}", post(generate))
        .with_state(state);
    format!("{}/models", common::spawn_router(app).await)
}

fn reply_with(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn test_generate_sends_prompt_and_returns_text() {
    let mock = MockGemini::new(200, reply_with("1. \"Song\" by Artist"));
    let base = spawn_gemini(mock.clone()).await;
    let client = GeminiClient::new("key-1", "gemini-pro", base);

    let text = client.generate("suggest something").await.unwrap();
    assert_eq!(text, "1. \"Song\" by Artist");

    let seen = mock.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    let (path, key, body) = &seen[0];
    assert_eq!(path, "gemini-pro:generateContent");
    assert_eq!(key.as_deref(), Some("key-1"));
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "suggest something");
}

#[tokio::test]
async fn test_generate_joins_parts() {
    let mock = MockGemini::new(
        200,
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": "1. \"A\" by B\n" }, { "text": "2. \"C\" by D" }] }
            }]
        }),
    );
    let client = GeminiClient::new("k", "gemini-pro", spawn_gemini(mock).await);

    let text = client.generate("p").await.unwrap();
    assert_eq!(text, "1. \"A\" by B\n2. \"C\" by D");
}

#[tokio::test]
async fn test_reply_without_candidates_is_empty() {
    let mock = MockGemini::new(200, json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
    let client = GeminiClient::new("k", "gemini-pro", spawn_gemini(mock).await);

    assert_eq!(client.generate("p").await.unwrap(), "");

    // which the recommender turns into an empty list
    let recommender = Recommender::new(Arc::new(client));
    assert!(recommender.suggest_playlist("focus").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let mock = MockGemini::new(
        400,
        json!({ "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" } }),
    );
    let client = GeminiClient::new("bad", "gemini-pro", spawn_gemini(mock).await);

    match client.generate("p").await {
        Err(RecommendationError::Status { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "INVALID_ARGUMENT: API key not valid");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[test]
fn test_missing_api_key() {
    let settings = GeminiSettings {
        api_key: None,
        model: "gemini-pro".to_string(),
        api_url: "https://example.invalid/models".to_string(),
    };

    assert!(matches!(
        GeminiClient::from_settings(&settings),
        Err(RecommendationError::MissingApiKey)
    ));
}
