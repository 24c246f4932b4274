use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Expiry reported by the auth endpoint, kept exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpiresAt {
    /// Seconds since the Unix epoch
    Epoch(i64),
    Text(String),
    Other(serde_json::Value),
}

impl ExpiresAt {
    /// Interpret the expiry as a UTC timestamp, if it is in a known format
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            ExpiresAt::Epoch(secs) => Utc.timestamp_opt(*secs, 0).single(),
            ExpiresAt::Text(text) => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            ExpiresAt::Other(_) => None,
        }
    }
}

/// Token and expiry returned by a successful authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    #[serde(default)]
    pub expires_at: Option<ExpiresAt>,
}

impl AuthSession {
    pub fn new(token: impl Into<String>, expires_at: Option<ExpiresAt>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Whether the reported expiry has passed.
    ///
    /// Informational only: the client reuses a cached token without
    /// checking this. Unknown formats are never considered expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .as_ref()
            .and_then(ExpiresAt::to_datetime)
            .map(|expiry| Utc::now() > expiry)
            .unwrap_or(false)
    }
}

/// In-memory holder for the client's cached authentication.
#[derive(Debug, Default)]
pub struct Session {
    pub data: Option<AuthSession>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached session
    pub fn update(&mut self, data: AuthSession) {
        self.data = Some(data);
    }

    /// Drop the cached session so the next request re-authenticates
    pub fn clear(&mut self) {
        self.data = None;
    }

    /// Get the token if one is cached
    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.is_some()
    }
}
