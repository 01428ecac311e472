// InterpretationClient tests against an in-process HTTP backend
//
// A small axum app plays the interpretation service: it counts hits,
// records the JSON body it received, and answers with a scripted response.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use somnia_capture::interpret::{InterpreterStatus, Mood};
use somnia_capture::{InterpretationClient, InterpretationRequest, InterpretError, Language};

#[derive(Clone)]
struct BackendState {
    hits: Arc<AtomicUsize>,
    received: Arc<Mutex<Option<serde_json::Value>>>,
    status: StatusCode,
    body: String,
}

async fn interpret_stub(
    State(state): State<BackendState>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.received.lock().unwrap() = Some(body);
    (state.status, state.body.clone())
}

async fn health_stub(State(state): State<BackendState>) -> (StatusCode, String) {
    (state.status, state.body.clone())
}

struct StubBackend {
    base_url: String,
    hits: Arc<AtomicUsize>,
    received: Arc<Mutex<Option<serde_json::Value>>>,
}

impl StubBackend {
    async fn spawn(status: StatusCode, body: &str) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let received = Arc::new(Mutex::new(None));

        let state = BackendState {
            hits: Arc::clone(&hits),
            received: Arc::clone(&received),
            status,
            body: body.to_string(),
        };

        let app = Router::new()
            .route("/interpret", post(interpret_stub).get(health_stub))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
            received,
        }
    }

    fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn received_body(&self) -> Option<serde_json::Value> {
        self.received.lock().unwrap().clone()
    }
}

fn request(dream: &str) -> InterpretationRequest {
    InterpretationRequest {
        dream: dream.to_string(),
        language: Some(Language::En),
        include_premium: None,
    }
}

const FULL_RESPONSE: &str = r#"{
    "summary": "A dream about release",
    "mood": "peaceful",
    "symbols": [{"symbol": "water", "meaning": "emotion", "relevance": "high"}],
    "emotionalAnalysis": {
        "primaryEmotion": "relief",
        "secondaryEmotions": ["calm"],
        "subconscious": "letting go"
    },
    "lifeConnections": [{"area": "personal_growth", "insight": "transition underway"}],
    "keyMessage": "Trust the current",
    "reflectionQuestions": ["What are you releasing?"],
    "tags": ["water"],
    "confidence": "medium"
}"#;

#[tokio::test]
async fn test_interpret_round_trip() {
    let backend = StubBackend::spawn(StatusCode::OK, FULL_RESPONSE).await;
    let client = InterpretationClient::new(&backend.base_url, None).unwrap();

    let interpretation = client
        .interpret(&request("I was floating down a river"))
        .await
        .unwrap();

    assert_eq!(interpretation.mood, Mood::Peaceful);
    assert_eq!(interpretation.key_message, "Trust the current");
    assert_eq!(backend.hit_count(), 1);

    // The wire body carries the camelCase contract
    let body = backend.received_body().unwrap();
    assert_eq!(body["dream"], "I was floating down a river");
    assert_eq!(body["language"], "en");
}

#[tokio::test]
async fn test_missing_dream_error_is_surfaced() {
    let backend = StubBackend::spawn(
        StatusCode::BAD_REQUEST,
        r#"{"error":"Dream description is required","code":"MISSING_DREAM"}"#,
    )
    .await;
    let client = InterpretationClient::new(&backend.base_url, None).unwrap();

    let err = client.interpret(&request("x")).await.unwrap_err();
    match err {
        InterpretError::Failed(message) => {
            assert_eq!(message, "Dream description is required")
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_dream_makes_no_network_call() {
    let backend = StubBackend::spawn(StatusCode::OK, FULL_RESPONSE).await;
    let client = InterpretationClient::new(&backend.base_url, None).unwrap();

    let err = client.interpret(&request("   ")).await.unwrap_err();
    assert!(matches!(err, InterpretError::EmptyDream));
    assert_eq!(backend.hit_count(), 0);
}

#[tokio::test]
async fn test_malformed_success_body() {
    let backend = StubBackend::spawn(StatusCode::OK, r#"{"ok":true}"#).await;
    let client = InterpretationClient::new(&backend.base_url, None).unwrap();

    let err = client.interpret(&request("falling")).await.unwrap_err();
    assert!(matches!(err, InterpretError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_health_check_parses_status() {
    let backend = StubBackend::spawn(
        StatusCode::OK,
        r#"{"status":"missing_api_key","provider":"openai","model":"gpt-4o-mini","type":"chat"}"#,
    )
    .await;
    let client = InterpretationClient::new(&backend.base_url, None).unwrap();

    let health = client.health().await.unwrap();
    assert_eq!(health.status, InterpreterStatus::MissingApiKey);
    assert_eq!(health.provider, "openai");
}
