use rocket::http::Status;
use thiserror::Error;

/// Shown for every failure past validation. Upstream detail goes to the log only.
pub const GENERIC_FAILURE: &str = "Error generating posts. Please try again.";

pub const EMPTY_TOPIC: &str = "Please enter a topic for your post";

#[derive(Debug, Error)]
pub enum GenerateError {
    // ── Validation (caught before any outbound request) ──
    #[error("topic is empty")]
    EmptyTopic,

    #[error("variation count {requested} is outside 1..={max}")]
    InvalidVariationCount { requested: u32, max: u32 },

    // ── Throttling ──
    #[error("too many generation requests")]
    RateLimited,

    // ── Transport / parse ──
    #[error("Gemini API key not configured")]
    NotConfigured,

    #[error("Gemini request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Gemini JSON parse error: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Gemini response has no candidate text")]
    NoCandidates,
}

impl GenerateError {
    /// The message the page shows. Everything past validation collapses
    /// into one generic string.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyTopic => EMPTY_TOPIC.to_string(),
            Self::InvalidVariationCount { max, .. } => {
                format!("Please choose between 1 and {} variations", max)
            }
            Self::RateLimited => {
                "Too many requests. Please wait a moment and try again.".to_string()
            }
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Self::EmptyTopic | Self::InvalidVariationCount { .. } => Status::UnprocessableEntity,
            Self::RateLimited => Status::TooManyRequests,
            _ => Status::BadGateway,
        }
    }
}
