use log::{error, info, warn};
use std::path::Path;
use std::process;

use crate::config::AppConfig;

/// The page cannot render without these.
const CRITICAL_FILES: &[&str] = &["website/templates/index.html.tera"];

/// Missing assets degrade the page but do not stop the server.
const STATIC_FILES: &[&str] = &["website/static/js/app.js", "website/static/css/app.css"];

/// Run start-up checks before Rocket launches. Aborts when a critical
/// file is missing; warns about everything else.
pub fn run(config: &AppConfig) {
    info!("PostGuru boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    for file in CRITICAL_FILES {
        if !Path::new(file).exists() {
            error!("  MISSING critical template: {}", file);
            errors += 1;
        }
    }

    for file in STATIC_FILES {
        if !Path::new(file).exists() {
            warn!("  Missing static asset: {}", file);
            warnings += 1;
        }
    }

    if config.api_key().is_none() {
        warn!("  No Gemini API key configured (set GEMINI_API_KEY); generation will fail");
        warnings += 1;
    }

    info!("  Model: {} (max {} variations)", config.gemini_model, config.max_variations);

    if errors > 0 {
        error!("Boot check failed with {} error(s), {} warning(s)", errors, warnings);
        process::exit(1);
    }
    info!("Boot check passed with {} warning(s)", warnings);
}
