#[macro_use]
extern crate rocket;

use std::sync::Arc;
use std::time::Duration;

use rocket::fairing::AdHoc;
use rocket::fs::FileServer;
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;

mod ai;
mod boot;
mod client;
mod config;
mod error;
mod models;
mod rate_limit;
mod routes;
mod session;

#[cfg(test)]
mod tests;

use ai::{GeminiClient, TextGenerator};
use config::AppConfig;
use rate_limit::RateLimiter;
use session::SessionStore;

/// Idle clients are forgotten after this long.
const SESSION_MAX_AGE: Duration = Duration::from_secs(6 * 60 * 60);
const SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Assemble the server around a text generator. `main` passes the Gemini
/// client; tests pass a fake.
pub fn app(config: AppConfig, generator: Arc<dyn TextGenerator>) -> Rocket<Build> {
    let sessions = Arc::new(SessionStore::new());
    let limiter = Arc::new(RateLimiter::new(
        config.generate_rate_limit,
        Duration::from_secs(config.generate_rate_window_secs),
    ));

    let sweeper = {
        let sessions = sessions.clone();
        let limiter = limiter.clone();
        AdHoc::on_liftoff("Session Sweeper", move |_| {
            Box::pin(async move {
                rocket::tokio::spawn(sweep(sessions, limiter));
            })
        })
    };

    rocket::build()
        .manage(config)
        .manage(generator)
        .manage(sessions)
        .manage(limiter)
        .attach(Template::fairing())
        .attach(sweeper)
        .mount("/static", FileServer::from("website/static"))
        .mount("/", routes::public::routes())
        .mount("/", routes![routes::health::health])
        .mount("/api", routes::api::routes())
        .register("/", routes::catchers())
        .register("/api", routes::api_catchers())
}

async fn sweep(sessions: Arc<SessionStore>, limiter: Arc<RateLimiter>) {
    let mut ticker = rocket::tokio::time::interval(SWEEP_INTERVAL);
    loop {
        ticker.tick().await;
        let dropped = sessions.cleanup(SESSION_MAX_AGE);
        limiter.cleanup();
        if dropped > 0 {
            log::info!("Dropped {} idle session(s), {} active", dropped, sessions.len());
        }
    }
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    if let Ok(path) = dotenvy::dotenv() {
        log::info!("Loaded environment from {}", path.display());
    }

    let config = AppConfig::load(&rocket::Config::figment()).expect("Invalid configuration");

    boot::run(&config);

    let gemini = GeminiClient::new(&config).expect("Failed to build Gemini HTTP client");

    app(config, Arc::new(gemini))
}
