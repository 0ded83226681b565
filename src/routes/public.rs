use std::sync::Arc;

use rocket::http::CookieJar;
use rocket::State;
use rocket_dyn_templates::Template;
use serde_json::{json, Value};

use crate::ai::TextGenerator;
use crate::client::ClientId;
use crate::config::AppConfig;
use crate::models::{Platform, Theme, Tone};
use crate::session::SessionStore;

// ── Homepage ───────────────────────────────────────────

#[get("/")]
pub fn index(
    client: ClientId,
    cookies: &CookieJar<'_>,
    config: &State<AppConfig>,
    generator: &State<Arc<dyn TextGenerator>>,
    sessions: &State<Arc<SessionStore>>,
) -> Template {
    let theme = Theme::load(cookies);
    let snapshot = sessions.snapshot(&client.0);

    let platforms: Vec<Value> = Platform::ALL
        .iter()
        .map(|p| json!({"value": p.as_str(), "label": p.label()}))
        .collect();
    let tones: Vec<Value> = Tone::ALL
        .iter()
        .map(|t| json!({"value": t.as_str(), "label": t.label()}))
        .collect();
    let variations: Vec<u32> = (1..=config.max_variations).collect();

    let context = json!({
        "theme": theme.as_str(),
        "dark": theme == Theme::Dark,
        "platforms": platforms,
        "tones": tones,
        "variations": variations,
        "configured": generator.is_configured(),
        "generation": snapshot.generation,
        "posts": snapshot.posts,
    });

    Template::render("index", &context)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![index]
}
