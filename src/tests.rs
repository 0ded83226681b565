#![cfg(test)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rocket::http::Status;
use rocket::local::asynchronous::Client;
use rocket::tokio::sync::Notify;
use serde_json::{json, Value};

use crate::ai::gemini::GeminiClient;
use crate::ai::{AiResponse, TextGenerator};
use crate::config::AppConfig;
use crate::error::{GenerateError, EMPTY_TOPIC, GENERIC_FAILURE};

// ═══════════════════════════════════════════════════════════
// Fake provider
// ═══════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
enum Reply {
    Text(&'static str),
    NoCandidates,
    Upstream,
}

/// Scripted generator: call N gets `replies[N]` (the last reply repeats).
/// When `gate` is set, the first call waits for it before answering.
struct FakeGenerator {
    replies: Vec<Reply>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl FakeGenerator {
    fn new(replies: Vec<Reply>) -> Self {
        FakeGenerator {
            replies,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    fn gated(replies: Vec<Reply>, gate: Arc<Notify>) -> Self {
        FakeGenerator {
            gate: Some(gate),
            ..Self::new(replies)
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[rocket::async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<AiResponse, GenerateError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        if n == 0 {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
        }

        match self.replies[n.min(self.replies.len() - 1)] {
            Reply::Text(text) => Ok(AiResponse {
                text: text.to_string(),
                provider: "fake".into(),
                model: "fake-1".into(),
            }),
            Reply::NoCandidates => Err(GenerateError::NoCandidates),
            Reply::Upstream => Err(GenerateError::Upstream {
                status: 500,
                body: "internal".into(),
            }),
        }
    }

    fn provider(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-1"
    }

    fn is_configured(&self) -> bool {
        true
    }
}

async fn client_with(config: AppConfig, fake: Arc<FakeGenerator>) -> Client {
    Client::tracked(crate::app(config, fake))
        .await
        .expect("valid rocket instance")
}

async fn client(fake: Arc<FakeGenerator>) -> Client {
    client_with(AppConfig::default(), fake).await
}

async fn post_generate(client: &Client, body: Value) -> (Status, Value) {
    let resp = client.post("/api/generate").json(&body).dispatch().await;
    let status = resp.status();
    let json = resp.into_json::<Value>().await.expect("json body");
    (status, json)
}

// ═══════════════════════════════════════════════════════════
// Generation
// ═══════════════════════════════════════════════════════════

#[rocket::async_test]
async fn generate_returns_numbered_posts() {
    let fake = Arc::new(FakeGenerator::new(vec![Reply::Text(
        "**Post 1:** Rust is fast.\n\n**Post 2:** Rust is safe.",
    )]));
    let client = client(fake.clone()).await;

    let (status, body) = post_generate(
        &client,
        json!({
            "topic": "why rust",
            "platform": "twitter",
            "tone": "casual",
            "variationCount": 2,
            "includeHashtags": true
        }),
    )
    .await;

    assert_eq!(status, Status::Ok);
    assert_eq!(body["ok"], true);
    assert_eq!(body["generation"], 1);
    assert_eq!(body["provider"], "fake");
    assert_eq!(
        body["posts"],
        json!([
            {"title": "Post 1", "content": "Rust is fast."},
            {"title": "Post 2", "content": "Rust is safe."}
        ])
    );

    let prompt = fake.last_prompt();
    assert!(prompt.starts_with("Generate 2 engaging text-only social media posts for twitter about: why rust"));
    assert!(prompt.contains("Tone: casual\n"));
    assert!(prompt.contains("Include relevant and trending hashtags"));
    assert!(prompt.contains("Keep each post within 280 characters"));
}

#[rocket::async_test]
async fn empty_topic_never_reaches_provider() {
    let fake = Arc::new(FakeGenerator::new(vec![Reply::Text("unused")]));
    let client = client(fake.clone()).await;

    for topic in ["", "   ", "\n\t"] {
        let (status, body) = post_generate(&client, json!({"topic": topic})).await;
        assert_eq!(status, Status::UnprocessableEntity);
        assert_eq!(body["error"], EMPTY_TOPIC);
    }
    let (status, _) = post_generate(&client, json!({"platform": "linkedin"})).await;
    assert_eq!(status, Status::UnprocessableEntity);

    assert_eq!(fake.calls(), 0);
}

#[rocket::async_test]
async fn variation_count_above_limit_is_rejected() {
    let fake = Arc::new(FakeGenerator::new(vec![Reply::Text("unused")]));
    let client = client(fake.clone()).await;

    let (status, body) = post_generate(&client, json!({"topic": "x", "variationCount": 4})).await;
    assert_eq!(status, Status::UnprocessableEntity);
    assert_eq!(body["ok"], false);
    assert_eq!(fake.calls(), 0);
}

#[rocket::async_test]
async fn upstream_failures_collapse_to_generic_message() {
    let fake = Arc::new(FakeGenerator::new(vec![Reply::NoCandidates, Reply::Upstream]));
    let client = client(fake.clone()).await;

    for expected_generation in [1, 2] {
        let (status, body) = post_generate(&client, json!({"topic": "coffee"})).await;
        assert_eq!(status, Status::BadGateway);
        assert_eq!(body["error"], GENERIC_FAILURE);
        assert_eq!(body["generation"], expected_generation);
    }

    let state: Value = client
        .get("/api/posts")
        .dispatch()
        .await
        .into_json()
        .await
        .unwrap();
    assert_eq!(state["loading"], false);
    assert_eq!(state["posts"], json!([]));
}

#[rocket::async_test]
async fn missing_api_key_is_bad_gateway_with_generic_message() {
    let config = AppConfig::default();
    let gemini = Arc::new(GeminiClient::new(&config).unwrap());
    let client = Client::tracked(crate::app(config, gemini))
        .await
        .expect("valid rocket instance");

    let status: Value = client.get("/api/status").dispatch().await.into_json().await.unwrap();
    assert_eq!(status["configured"], false);

    let (status, body) = post_generate(&client, json!({"topic": "coffee"})).await;
    assert_eq!(status, Status::BadGateway);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], GENERIC_FAILURE);
}

#[rocket::async_test]
async fn generate_accepts_body_without_content_type() {
    let fake = Arc::new(FakeGenerator::new(vec![Reply::Text("**Post 1:** plain body")]));
    let client = client(fake.clone()).await;

    let resp = client
        .post("/api/generate")
        .body(r#"{"topic":"no header"}"#)
        .dispatch()
        .await;
    assert_eq!(resp.status(), Status::Ok);
    let body: Value = resp.into_json().await.unwrap();
    assert_eq!(body["posts"], json!([{"title": "Post 1", "content": "plain body"}]));
    assert_eq!(fake.calls(), 1);

    let resp = client
        .post("/api/generate")
        .body("topic=not-json")
        .dispatch()
        .await;
    assert_eq!(resp.status(), Status::BadRequest);
    let body: Value = resp.into_json().await.unwrap();
    assert_eq!(body["ok"], false);
    assert_eq!(fake.calls(), 1);
}

#[rocket::async_test]
async fn unknown_platform_hits_json_catcher() {
    let fake = Arc::new(FakeGenerator::new(vec![Reply::Text("unused")]));
    let client = client(fake.clone()).await;

    let (status, body) = post_generate(&client, json!({"topic": "x", "platform": "myspace"})).await;
    assert_eq!(status, Status::UnprocessableEntity);
    assert_eq!(body["error"], "Invalid generation request");
    assert_eq!(fake.calls(), 0);
}

#[rocket::async_test]
async fn stale_response_does_not_overwrite_newer_posts() {
    let gate = Arc::new(Notify::new());
    let fake = Arc::new(FakeGenerator::gated(
        vec![Reply::Text("**Post 1:** old answer"), Reply::Text("**Post 1:** new answer")],
        gate.clone(),
    ));
    let client = client(fake.clone()).await;

    // Issue the client cookie before the two racing requests.
    client.get("/api/posts").dispatch().await;

    let first = post_generate(&client, json!({"topic": "first"}));
    let second = async {
        while fake.calls() == 0 {
            rocket::tokio::task::yield_now().await;
        }
        let result = post_generate(&client, json!({"topic": "second"})).await;
        gate.notify_one();
        result
    };

    let ((first_status, first_body), (second_status, second_body)) =
        rocket::tokio::join!(first, second);

    assert_eq!(second_status, Status::Ok);
    assert_eq!(second_body["generation"], 2);
    assert_eq!(first_status, Status::Conflict);
    assert_eq!(first_body["stale"], true);
    assert_eq!(first_body["generation"], 1);

    let state: Value = client
        .get("/api/posts")
        .dispatch()
        .await
        .into_json()
        .await
        .unwrap();
    assert_eq!(state["generation"], 2);
    assert_eq!(state["posts"], json!([{"title": "Post 1", "content": "new answer"}]));
}

#[rocket::async_test]
async fn rate_limit_blocks_before_provider_call() {
    let fake = Arc::new(FakeGenerator::new(vec![Reply::Text("one post")]));
    let config = AppConfig {
        generate_rate_limit: 1,
        ..AppConfig::default()
    };
    let client = client_with(config, fake.clone()).await;

    let (status, body) = post_generate(&client, json!({"topic": "a"})).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["remaining"], 0);

    let (status, body) = post_generate(&client, json!({"topic": "b"})).await;
    assert_eq!(status, Status::TooManyRequests);
    assert_eq!(body["ok"], false);
    assert_eq!(fake.calls(), 1);
}

// ═══════════════════════════════════════════════════════════
// Page, theme, status
// ═══════════════════════════════════════════════════════════

#[rocket::async_test]
async fn index_renders_form_and_last_results() {
    let fake = Arc::new(FakeGenerator::new(vec![Reply::Text("A caption about tea")]));
    let client = client(fake).await;

    let (status, _) = post_generate(&client, json!({"topic": "tea"})).await;
    assert_eq!(status, Status::Ok);

    let resp = client.get("/").dispatch().await;
    assert_eq!(resp.status(), Status::Ok);
    let html = resp.into_string().await.unwrap();
    assert!(html.contains("PostGuru"));
    assert!(html.contains(r#"<option value="instagram">Instagram</option>"#));
    assert!(html.contains(r#"<option value="humorous">Humorous</option>"#));
    assert!(html.contains(r#"<option value="3">3</option>"#));
    assert!(!html.contains(r#"<option value="4">"#));
    assert!(html.contains("A caption about tea"));
    assert!(html.contains("Light Mode"));
}

#[rocket::async_test]
async fn theme_preference_round_trips_through_cookie() {
    let fake = Arc::new(FakeGenerator::new(vec![Reply::Text("unused")]));
    let client = client(fake).await;

    let body: Value = client
        .post("/api/theme/toggle")
        .dispatch()
        .await
        .into_json()
        .await
        .unwrap();
    assert_eq!(body["theme"], "dark");

    let html = client.get("/").dispatch().await.into_string().await.unwrap();
    assert!(html.contains(r#"class="dark""#));
    assert!(html.contains("Dark Mode"));

    let resp = client
        .post("/api/theme")
        .json(&json!({"theme": "light"}))
        .dispatch()
        .await;
    assert_eq!(resp.status(), Status::Ok);
    let html = client.get("/").dispatch().await.into_string().await.unwrap();
    assert!(html.contains("Light Mode"));

    let resp = client
        .post("/api/theme")
        .json(&json!({"theme": "sepia"}))
        .dispatch()
        .await;
    assert_eq!(resp.status(), Status::UnprocessableEntity);
}

#[rocket::async_test]
async fn status_and_health_endpoints() {
    let fake = Arc::new(FakeGenerator::new(vec![Reply::Text("unused")]));
    let client = client(fake).await;

    let status: Value = client.get("/api/status").dispatch().await.into_json().await.unwrap();
    assert_eq!(status["configured"], true);
    assert_eq!(status["provider"], "fake");
    assert_eq!(status["max_variations"], 3);

    let health: Value = client.get("/health").dispatch().await.into_json().await.unwrap();
    assert_eq!(health["status"], "ok");

    let resp = client.get("/api/nope").dispatch().await;
    assert_eq!(resp.status(), Status::NotFound);
    let body: Value = resp.into_json().await.unwrap();
    assert_eq!(body["ok"], false);
}
