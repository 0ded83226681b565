use std::str::FromStr;

use rocket::http::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

pub const THEME_COOKIE: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(()),
        }
    }
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Saved preference, or light when the cookie is absent or garbled.
    pub fn load(cookies: &CookieJar<'_>) -> Self {
        cookies
            .get(THEME_COOKIE)
            .and_then(|c| c.value().parse().ok())
            .unwrap_or_default()
    }

    pub fn store(self, cookies: &CookieJar<'_>) {
        let mut cookie = Cookie::new(THEME_COOKIE, self.as_str());
        cookie.set_same_site(SameSite::Lax);
        cookie.set_path("/");
        cookie.set_max_age(rocket::time::Duration::days(365));
        cookies.add(cookie);
    }
}
