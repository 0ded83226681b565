pub mod api;
pub mod health;
pub mod public;

use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::Request;
use serde_json::{json, Value};

use crate::error::GENERIC_FAILURE;

// ── Catchers ───────────────────────────────────────────

#[catch(404)]
pub fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(500)]
pub fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(404)]
pub fn api_not_found(req: &Request<'_>) -> Json<Value> {
    Json(json!({"ok": false, "error": format!("No such endpoint: {}", req.uri().path())}))
}

/// Body did not deserialize (unknown platform, wrong types, ...).
#[catch(422)]
pub fn api_unprocessable() -> Json<Value> {
    Json(json!({"ok": false, "error": "Invalid generation request"}))
}

#[catch(400)]
pub fn api_bad_request() -> Json<Value> {
    Json(json!({"ok": false, "error": "Malformed request body"}))
}

#[catch(500)]
pub fn api_server_error() -> Json<Value> {
    Json(json!({"ok": false, "error": GENERIC_FAILURE}))
}

pub fn catchers() -> Vec<rocket::Catcher> {
    catchers![not_found, server_error]
}

pub fn api_catchers() -> Vec<rocket::Catcher> {
    catchers![api_not_found, api_unprocessable, api_bad_request, api_server_error]
}
