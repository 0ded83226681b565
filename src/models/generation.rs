use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Twitter,
    Linkedin,
    Facebook,
    Instagram,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::Linkedin,
        Platform::Facebook,
        Platform::Instagram,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Linkedin => "linkedin",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::Linkedin => "Linkedin",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Friendly,
    Humorous,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Professional, Tone::Casual, Tone::Friendly, Tone::Humorous];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Casual => "casual",
            Self::Friendly => "friendly",
            Self::Humorous => "humorous",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Casual => "Casual",
            Self::Friendly => "Friendly",
            Self::Humorous => "Humorous",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn one() -> u32 {
    1
}

/// Everything the form submits for one generation. Built fresh per request
/// and passed explicitly; nothing here outlives the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default = "one")]
    pub variation_count: u32,
    #[serde(default)]
    pub include_thread: bool,
    #[serde(default)]
    pub include_hashtags: bool,
    #[serde(default)]
    pub include_emojis: bool,
}

impl GenerationRequest {
    #[cfg(test)]
    pub fn new(topic: &str, platform: Platform, tone: Tone) -> Self {
        GenerationRequest {
            topic: topic.to_string(),
            platform,
            tone,
            variation_count: 1,
            include_thread: false,
            include_hashtags: false,
            include_emojis: false,
        }
    }

    /// Reject what the prompt builder must never see. Runs before any
    /// outbound request is made.
    pub fn validate(&self, max_variations: u32) -> Result<(), GenerateError> {
        if self.topic.trim().is_empty() {
            return Err(GenerateError::EmptyTopic);
        }
        if self.variation_count < 1 || self.variation_count > max_variations {
            return Err(GenerateError::InvalidVariationCount {
                requested: self.variation_count,
                max: max_variations,
            });
        }
        Ok(())
    }
}
