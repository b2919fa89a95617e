use serde::Deserialize;

/// Name of the short-lived cookie carrying the CSRF state between login
/// initiation and the callback.
pub const STATE_COOKIE: &str = "state";

/// Query parameters the provider redirects back with.
///
/// Both are required by the flow; they are optional here so that a missing
/// parameter produces our own 400 instead of an extractor rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// Options for the callback router: session cookie shape and where to send
/// the browser after a successful login.
#[derive(Debug, Clone)]
pub struct CallbackOptions {
    pub cookie: CookieConfig,
    pub landing_path: String,
}

impl Default for CallbackOptions {
    fn default() -> Self {
        Self {
            cookie: CookieConfig::default(),
            landing_path: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: CookieSameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session_id".to_string(),
            http_only: true,
            secure: true,
            same_site: CookieSameSite::Lax,
            path: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum CookieSameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl CookieConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            http_only: true,
            secure: true,
            same_site: CookieSameSite::Lax,
            path: "/".to_string(),
        }
    }

    /// Like the default, but without `Secure` so plain-http localhost works.
    pub fn development() -> Self {
        Self {
            name: "session_id".to_string(),
            http_only: true,
            secure: false,
            same_site: CookieSameSite::Lax,
            path: "/".to_string(),
        }
    }
}
