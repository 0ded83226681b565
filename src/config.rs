use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application settings, read from `Rocket.toml` / `ROCKET_*` env vars.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(skip_serializing)]
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout_secs: u64,
    /// Left out of the request when unset so Gemini's own defaults apply.
    pub gemini_max_tokens: Option<u32>,
    pub gemini_temperature: Option<f32>,
    pub max_variations: u32,
    pub generate_rate_limit: u64,
    pub generate_rate_window_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            gemini_api_key: String::new(),
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            gemini_timeout_secs: 120,
            gemini_max_tokens: None,
            gemini_temperature: None,
            max_variations: 3,
            generate_rate_limit: 10,
            generate_rate_window_secs: 60,
        }
    }
}

impl AppConfig {
    /// Extract from the Rocket figment, then fill the key from `GEMINI_API_KEY`
    /// when the figment has none.
    pub fn load(figment: &rocket::figment::Figment) -> Result<Self, rocket::figment::Error> {
        let mut config: AppConfig = figment.extract()?;
        if config.gemini_api_key.trim().is_empty() {
            if let Ok(key) = std::env::var("GEMINI_API_KEY") {
                config.gemini_api_key = key;
            }
        }
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        self.gemini_api_key = self.gemini_api_key.trim().to_string();
        self.max_variations = self.max_variations.max(1);
        self.generate_rate_limit = self.generate_rate_limit.max(1);
        self.generate_rate_window_secs = self.generate_rate_window_secs.max(1);
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        if self.gemini_api_key.is_empty() {
            None
        } else {
            Some(&self.gemini_api_key)
        }
    }
}
