use std::sync::Arc;

use rocket::http::{CookieJar, Status};
use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::ai::{self, TextGenerator};
use crate::client::{ClientId, ClientIp};
use crate::config::AppConfig;
use crate::error::GenerateError;
use crate::models::{GenerationRequest, Theme};
use crate::rate_limit::RateLimiter;
use crate::session::SessionStore;

type ApiResult = (Status, Json<Value>);

fn error_response(e: &GenerateError) -> ApiResult {
    (e.status(), Json(json!({"ok": false, "error": e.user_message()})))
}

// ── Generate ───────────────────────────────────────────

#[post("/generate", data = "<body>")]
pub async fn generate(
    body: Json<GenerationRequest>,
    client: ClientId,
    client_ip: ClientIp,
    config: &State<AppConfig>,
    generator: &State<Arc<dyn TextGenerator>>,
    sessions: &State<Arc<SessionStore>>,
    limiter: &State<Arc<RateLimiter>>,
) -> ApiResult {
    let req = body.into_inner();

    if let Err(e) = req.validate(config.max_variations) {
        log::info!("Rejected generation request: {}", e);
        return error_response(&e);
    }

    let limit_key = format!("generate:{}", client_ip.hashed());
    if !limiter.check_and_record(&limit_key) {
        log::warn!("Generation rate limit hit");
        return error_response(&GenerateError::RateLimited);
    }

    let ticket = sessions.begin(&client.0);

    match ai::generate_posts(&**generator.inner(), &req).await {
        Ok(generated) => {
            if !sessions.is_current(&client.0, ticket) {
                log::info!("Discarding stale generation {}", ticket);
                return stale(ticket);
            }
            let posts = generated.posts.clone();
            if !sessions.complete(&client.0, ticket, generated.posts) {
                return stale(ticket);
            }
            (
                Status::Ok,
                Json(json!({
                    "ok": true,
                    "generation": ticket,
                    "posts": posts,
                    "provider": generated.provider,
                    "model": generated.model,
                    "remaining": limiter.remaining(&limit_key),
                })),
            )
        }
        Err(e) => {
            log::warn!("Generation {} failed: {}", ticket, e);
            if !sessions.fail(&client.0, ticket) {
                return stale(ticket);
            }
            let (status, Json(mut body)) = error_response(&e);
            body["generation"] = json!(ticket);
            (status, Json(body))
        }
    }
}

fn stale(ticket: u64) -> ApiResult {
    (
        Status::Conflict,
        Json(json!({"ok": false, "stale": true, "generation": ticket})),
    )
}

// ── Current state ──────────────────────────────────────

#[get("/posts")]
pub fn current_posts(client: ClientId, sessions: &State<Arc<SessionStore>>) -> Json<Value> {
    let snapshot = sessions.snapshot(&client.0);
    Json(json!({
        "ok": true,
        "generation": snapshot.generation,
        "loading": snapshot.loading,
        "posts": snapshot.posts,
    }))
}

// ── Status ─────────────────────────────────────────────

#[get("/status")]
pub fn status(config: &State<AppConfig>, generator: &State<Arc<dyn TextGenerator>>) -> Json<Value> {
    Json(json!({
        "configured": generator.is_configured(),
        "provider": generator.provider(),
        "model": generator.model(),
        "max_variations": config.max_variations,
    }))
}

// ── Theme ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: String,
}

#[post("/theme", data = "<body>")]
pub fn set_theme(cookies: &CookieJar<'_>, body: Json<ThemeRequest>) -> ApiResult {
    match body.theme.parse::<Theme>() {
        Ok(theme) => {
            theme.store(cookies);
            (Status::Ok, Json(json!({"ok": true, "theme": theme})))
        }
        Err(()) => (
            Status::UnprocessableEntity,
            Json(json!({"ok": false, "error": "Theme must be \"dark\" or \"light\""})),
        ),
    }
}

#[post("/theme/toggle")]
pub fn toggle_theme(cookies: &CookieJar<'_>) -> Json<Value> {
    let theme = Theme::load(cookies).toggled();
    theme.store(cookies);
    Json(json!({"ok": true, "theme": theme}))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![generate, current_posts, status, set_theme, toggle_theme]
}
