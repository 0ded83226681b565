use crate::models::{GenerationRequest, Platform};

pub const THREAD_LINE: &str = "Format as a thread (multiple connected posts)";
pub const HASHTAGS_LINE: &str = "Include relevant and trending hashtags";
pub const EMOJIS_LINE: &str = "Include appropriate and engaging emojis";
pub const TWITTER_LINE: &str = "Keep each post within 280 characters";
pub const INSTAGRAM_LINE: &str =
    "Do not include any image suggestions or photo descriptions. Only generate caption text.";

/// Build the instruction sent to the model. Never fails; the request is
/// expected to have passed `GenerationRequest::validate` already.
pub fn build_prompt(req: &GenerationRequest) -> String {
    let mut prompt = format!(
        "Generate {} engaging text-only social media post{} for {} about: {}\n\n",
        req.variation_count,
        if req.variation_count > 1 { "s" } else { "" },
        req.platform,
        req.topic
    );

    prompt.push_str(&format!("Tone: {}\n", req.tone));

    let mut line = |text: &str| {
        prompt.push_str(text);
        prompt.push('\n');
    };

    if req.include_thread {
        line(THREAD_LINE);
    }
    if req.include_hashtags {
        line(HASHTAGS_LINE);
    }
    if req.include_emojis {
        line(EMOJIS_LINE);
    }

    match req.platform {
        Platform::Twitter => line(TWITTER_LINE),
        Platform::Instagram => line(INSTAGRAM_LINE),
        Platform::Linkedin | Platform::Facebook => {}
    }

    prompt
}
