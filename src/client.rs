use rocket::http::{Cookie, SameSite};
use rocket::request::{FromRequest, Outcome, Request};
use sha2::{Digest, Sha256};

pub const CLIENT_COOKIE: &str = "pg_client";

/// Extracts the real client IP, checking proxy headers first.
/// Priority: CF-Connecting-IP > X-Real-IP > X-Forwarded-For (first) > socket peer.
pub struct ClientIp(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientIp {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let headers = request.headers();

        for name in ["CF-Connecting-IP", "X-Real-IP"] {
            if let Some(ip) = headers.get_one(name) {
                let ip = ip.trim();
                if !ip.is_empty() {
                    return Outcome::Success(ClientIp(ip.to_string()));
                }
            }
        }

        // X-Forwarded-For: client, proxy1, proxy2 — take the leftmost
        if let Some(ip) = headers
            .get_one("X-Forwarded-For")
            .and_then(|f| f.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
        {
            return Outcome::Success(ClientIp(ip.to_string()));
        }

        let ip = request
            .client_ip()
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Outcome::Success(ClientIp(ip))
    }
}

impl ClientIp {
    pub fn hashed(&self) -> String {
        hash_ip(&self.0)
    }
}

pub fn hash_ip(ip: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    hex::encode(hasher.finalize())
}

/// Opaque per-browser id kept in a private cookie. Issued on first visit;
/// keys the generation state in `SessionStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientId {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let cookies = request.cookies();
        if let Some(cookie) = cookies.get_private(CLIENT_COOKIE) {
            let id = cookie.value().trim();
            if !id.is_empty() {
                return Outcome::Success(ClientId(id.to_string()));
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        let mut cookie = Cookie::new(CLIENT_COOKIE, id.clone());
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Strict);
        cookie.set_path("/");
        cookies.add_private(cookie);
        log::debug!("Issued new client id");
        Outcome::Success(ClientId(id))
    }
}
