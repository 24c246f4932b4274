//! Client configuration.
//!
//! A `Config` holds the API base URL and the credentials used to obtain a
//! token. Fields omitted from `ClientOptions` fall back to the process
//! environment (`GMAP_API_URL`, `GMAP_USERNAME`, `GMAP_PASSWORD`). The
//! environment is read here and nowhere else.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment variable holding the API base URL
pub const ENV_API_URL: &str = "GMAP_API_URL";

/// Environment variable holding the API username
pub const ENV_USERNAME: &str = "GMAP_USERNAME";

/// Environment variable holding the API password
pub const ENV_PASSWORD: &str = "GMAP_PASSWORD";

/// Path of the authentication endpoint, relative to the API base URL
const AUTH_PATH: &str = "/auth/";

/// Optional overrides for building a `Config`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientOptions {
    pub api_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ClientOptions {
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api_url: String,
    pub username: String,
    pub password: String,
}

impl Config {
    /// Build a config from explicit values, without consulting the environment.
    pub fn new(
        api_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Build a config entirely from the environment
    pub fn from_env() -> Self {
        Self::from_options(ClientOptions::default())
    }

    /// Build a config from `options`, filling any omitted field from the
    /// environment. Values missing from both resolve to an empty string;
    /// nothing is validated here.
    pub fn from_options(options: ClientOptions) -> Self {
        Self::resolve(options, |key| std::env::var(key).ok())
    }

    fn resolve<F>(options: ClientOptions, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |value: Option<String>, key: &str| {
            value.or_else(|| lookup(key)).unwrap_or_default()
        };

        Self {
            api_url: pick(options.api_url, ENV_API_URL),
            username: pick(options.username, ENV_USERNAME),
            password: pick(options.password, ENV_PASSWORD),
        }
    }

    /// URL of the authentication endpoint (`{api_url}/auth/`)
    pub fn auth_url(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), AUTH_PATH)
    }
}

// Keep the password out of logs and panic messages.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_omitted_fields_fall_back_to_environment() {
        let vars = env(&[
            (ENV_API_URL, "http://gmap.local/api"),
            (ENV_USERNAME, "env-user"),
            (ENV_PASSWORD, "env-pass"),
        ]);

        let config = Config::resolve(
            ClientOptions::default().username("explicit-user"),
            |key| vars.get(key).cloned(),
        );

        assert_eq!(config.api_url, "http://gmap.local/api");
        assert_eq!(config.username, "explicit-user");
        assert_eq!(config.password, "env-pass");
    }

    #[test]
    fn test_missing_everywhere_resolves_to_empty() {
        let config = Config::resolve(ClientOptions::default(), |_| None);
        assert_eq!(config, Config::new("", "", ""));
    }

    #[test]
    fn test_auth_url() {
        let config = Config::new("http://gmap.local", "u", "p");
        assert_eq!(config.auth_url(), "http://gmap.local/auth/");

        // Trailing slash on the base is not doubled
        let config = Config::new("http://gmap.local/api/", "u", "p");
        assert_eq!(config.auth_url(), "http://gmap.local/api/auth/");
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = Config::new("http://gmap.local", "user", "hunter2");
        let debug = format!("{:?}", config);
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
    }
}
