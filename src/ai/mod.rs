pub mod gemini;
pub mod parse;
pub mod prompts;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::models::{GeneratedPost, GenerationRequest};

pub use gemini::GeminiClient;

// ── Types ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
}

/// A finished generation: the posts plus where they came from.
#[derive(Debug, Clone, Serialize)]
pub struct Generated {
    pub posts: Vec<GeneratedPost>,
    pub provider: String,
    pub model: String,
}

// ── Provider seam ─────────────────────────────────────

/// Anything that turns a prompt into model text. Managed in Rocket state as
/// `Arc<dyn TextGenerator>`.
#[rocket::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<AiResponse, GenerateError>;

    fn provider(&self) -> &str;
    fn model(&self) -> &str;
    fn is_configured(&self) -> bool;
}

// ── Public API ────────────────────────────────────────

/// Build the prompt, call the provider once and split the answer into posts.
/// The request must already be validated.
pub async fn generate_posts(
    generator: &dyn TextGenerator,
    req: &GenerationRequest,
) -> Result<Generated, GenerateError> {
    let prompt = prompts::build_prompt(req);
    log::info!(
        "Generating {} post(s) for {} via {}",
        req.variation_count,
        req.platform,
        generator.provider()
    );

    let resp = generator.generate(&prompt).await?;
    log::debug!("AI raw response: {}", truncate(&resp.text, 500));

    let posts = parse::parse_posts(&resp.text);
    log::info!("Parsed {} post(s) from {} response", posts.len(), resp.provider);

    Ok(Generated {
        posts,
        provider: resp.provider,
        model: resp.model,
    })
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
