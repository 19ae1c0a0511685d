//! Runtime configuration for the booking frontend.
//!
//! Values come from the process environment when there is one (the SSR
//! server, after `.env` has been loaded), otherwise from the same variables
//! captured at compile time, which is what the browser bundle sees.

pub const API_URL_VAR: &str = "CLOKTRIX_API_URL";
pub const LOGIN_PATH_VAR: &str = "CLOKTRIX_LOGIN_PATH";
pub const TOKEN_KEY_VAR: &str = "CLOKTRIX_TOKEN_KEY";

const DEFAULT_API_URL: &str = "/api";
const DEFAULT_LOGIN_PATH: &str = "/login";
const DEFAULT_TOKEN_KEY: &str = "cloktrix_auth_token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the REST backend, without a trailing slash.
    pub api_base_url: String,
    /// Where the browser is sent when the session has expired.
    pub login_path: String,
    /// localStorage key holding the bearer token.
    pub auth_token_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            auth_token_key: DEFAULT_TOKEN_KEY.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        Self::from_lookup(|name| {
            std::env::var(name).ok().or_else(|| compiled_value(name))
        })
    }

    /// Builds a config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str, default: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            api_base_url: read(API_URL_VAR, DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            login_path: read(LOGIN_PATH_VAR, DEFAULT_LOGIN_PATH),
            auth_token_key: read(TOKEN_KEY_VAR, DEFAULT_TOKEN_KEY),
        }
    }

    /// Absolute API base. A path-only base is joined onto the page origin when one is known.
    pub fn api_url(&self, origin: Option<&str>) -> String {
        match origin {
            Some(origin) if self.api_base_url.starts_with('/') => {
                format!("{}{}", origin.trim_end_matches('/'), self.api_base_url)
            }
            _ => self.api_base_url.clone(),
        }
    }
}

fn compiled_value(name: &str) -> Option<String> {
    let value = match name {
        API_URL_VAR => option_env!("CLOKTRIX_API_URL"),
        LOGIN_PATH_VAR => option_env!("CLOKTRIX_LOGIN_PATH"),
        TOKEN_KEY_VAR => option_env!("CLOKTRIX_TOKEN_KEY"),
        _ => None,
    };
    value.map(str::to_string)
}
