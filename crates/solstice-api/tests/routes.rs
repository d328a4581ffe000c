//! Router tests with a mock gateway standing in for the LLM provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use solstice_api::state::AppState;
use solstice_llm::error::LlmError;
use solstice_llm::gateway::ChatGateway;

/// Canned gateway that records every prompt it receives.
struct MockGateway {
    reply: Box<dyn Fn() -> Result<String, LlmError> + Send + Sync>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockGateway {
    fn replying(text: &str) -> Arc<Self> {
        let text = text.to_string();
        Self::with(move || Ok(text.clone()))
    }

    fn with(reply: impl Fn() -> Result<String, LlmError> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(reply),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl ChatGateway for MockGateway {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.reply)()
    }
}

fn router(gateway: Arc<MockGateway>) -> Router {
    let gateway: Arc<dyn ChatGateway> = gateway;
    solstice_api::app(AppState { gateway })
}

fn post(path: &str, auth: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_needs_no_auth() {
    let gateway = MockGateway::replying("{}");
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, body) = send(router(gateway.clone()), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "message": "Solstice Agent API is running" }));
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn missing_auth_is_rejected_before_the_gateway() {
    let gateway = MockGateway::replying(r#"{"cards": []}"#);

    let requests = [
        post("/parse", None, json!({ "url": "https://youtu.be/abc" })),
        post("/cue", None, json!({ "card": { "title": "Squat" } })),
        post("/recommend", None, json!({ "userId": "u1" })),
        post("/parse", Some(""), json!({ "url": "https://youtu.be/abc" })),
        post("/recommend", Some("Bearer "), json!({ "userId": "u1" })),
    ];

    for req in requests {
        let (status, body) = send(router(gateway.clone()), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], json!("Authorization header missing"));
    }
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn parse_back_fills_cards() {
    let reply = r#"Here you go:
```json
{"cards": [
  {"title": "Squat", "startTime": 0, "endTime": 30, "sets": 3, "reps": 10},
  {"title": "Lunge", "id": "keep-me", "source_type": "youtube"}
]}
```"#;
    let gateway = MockGateway::replying(reply);

    let req = post(
        "/parse",
        Some("Bearer user-1"),
        json!({ "url": "https://www.youtube.com/watch?v=abc" }),
    );
    let (status, body) = send(router(gateway.clone()), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(gateway.calls(), 1);
    assert!(gateway.last_prompt().contains("Parse the following youtube URL"));

    let cards = body["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 2);

    assert_eq!(cards[0]["source_url"], json!("https://www.youtube.com/watch?v=abc"));
    assert_eq!(cards[0]["source_type"], json!("youtube"));
    assert_eq!(cards[0]["createdBy"], json!("agent"));
    assert!(cards[0]["id"].as_str().unwrap().starts_with("card-"));

    assert_eq!(cards[1]["id"], json!("keep-me"));
}

#[tokio::test]
async fn parse_rejects_invalid_urls() {
    let gateway = MockGateway::replying(r#"{"cards": []}"#);

    let req = post("/parse", Some("Bearer u"), json!({ "url": "not a url" }));
    let (status, body) = send(router(gateway.clone()), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());

    let req = post("/parse", Some("Bearer u"), json!({ "url": "ftp://example.org/file" }));
    let (status, _) = send(router(gateway.clone()), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn malformed_bodies_get_a_detail_message() {
    let gateway = MockGateway::replying(r#"{"cues": []}"#);

    let req = Request::builder()
        .method("POST")
        .uri("/cue")
        .header("content-type", "application/json")
        .header("authorization", "Bearer u")
        .body(Body::from("{\"card\": "))
        .unwrap();
    let (status, body) = send(router(gateway.clone()), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());

    // Well-formed JSON missing a required field.
    let req = post("/recommend", Some("Bearer u"), json!({ "tags": ["core"] }));
    let (status, body) = send(router(gateway.clone()), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("userId"));

    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn cue_generates_ids() {
    let reply = json!({
        "cues": [
            { "label": "Keep core engaged", "instructions": "Brace", "type": "form" },
            { "label": "Breathe deeply", "type": "breathing" }
        ]
    })
    .to_string();
    let gateway = MockGateway::replying(&reply);

    let req = post(
        "/cue",
        Some("Bearer user-1"),
        json!({ "card": { "title": "Goblet Squat", "duration": 45 } }),
    );
    let (status, body) = send(router(gateway.clone()), req).await;

    assert_eq!(status, StatusCode::OK);
    assert!(gateway.last_prompt().contains("Exercise: Goblet Squat"));

    let cues = body["cues"].as_array().unwrap();
    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0]["type"], json!("form"));
    let first = cues[0]["id"].as_str().unwrap();
    let second = cues[1]["id"].as_str().unwrap();
    assert!(first.starts_with("cue-"));
    assert!(second.starts_with("cue-"));
    assert_ne!(first, second);
}

#[tokio::test]
async fn recommend_uses_tags() {
    let reply = r#"Sure. {"routines": [{"id": "r-1", "title": "Morning Mobility Flow", "tags": ["mobility"]}, {"title": "Quick Core Blast"}]}"#;
    let gateway = MockGateway::replying(reply);

    let req = post(
        "/recommend",
        Some("token-abc"),
        json!({ "userId": "u1", "tags": ["mobility", "core"] }),
    );
    let (status, body) = send(router(gateway.clone()), req).await;

    assert_eq!(status, StatusCode::OK);
    assert!(gateway.last_prompt().contains("Tags/Interests: mobility, core"));

    let routines = body["routines"].as_array().unwrap();
    assert_eq!(routines[0]["id"], json!("r-1"));
    assert!(routines[1]["id"].as_str().unwrap().starts_with("routine-"));
}

#[tokio::test]
async fn upstream_failure_is_500_without_partial_data() {
    let gateway = MockGateway::with(|| Err(LlmError::Upstream("operation timed out".to_string())));

    let req = post("/parse", Some("Bearer u"), json!({ "url": "https://youtu.be/abc" }));
    let (status, body) = send(router(gateway.clone()), req).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("cards").is_none());
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Error parsing URL"));
    assert!(detail.contains("operation timed out"));
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn missing_credential_is_500() {
    let gateway = MockGateway::with(|| Err(LlmError::MissingCredential));

    let req = post("/cue", Some("Bearer u"), json!({ "card": { "title": "Plank" } }));
    let (status, body) = send(router(gateway), req).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("cues").is_none());
    assert!(body["detail"].as_str().unwrap().contains("API key is missing"));
}

#[tokio::test]
async fn unparseable_output_is_500() {
    let gateway = MockGateway::replying("I'm sorry, I cannot access external links.");

    let req = post("/recommend", Some("Bearer u"), json!({ "userId": "u1" }));
    let (status, body) = send(router(gateway), req).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("routines").is_none());
    assert!(body["detail"].as_str().unwrap().contains("could not interpret model output"));
}

#[tokio::test]
async fn wrong_key_or_shape_is_500() {
    let gateway = MockGateway::replying(r#"{"routines": []}"#);
    let req = post("/parse", Some("Bearer u"), json!({ "url": "https://youtu.be/abc" }));
    let (status, _) = send(router(gateway), req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let gateway = MockGateway::replying(r#"{"cards": [{"title": "Squat", "sets": "three"}]}"#);
    let req = post("/parse", Some("Bearer u"), json!({ "url": "https://youtu.be/abc" }));
    let (status, body) = send(router(gateway), req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("cards").is_none());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let gateway = MockGateway::replying("{}");
    let req = Request::builder()
        .uri("/")
        .header("origin", "https://app.example")
        .body(Body::empty())
        .unwrap();

    let response = router(gateway).oneshot(req).await.unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
