//! API client for communicating with the GMAP REST API.
//!
//! `GmapClient` authenticates once, caches the token, and sends it on
//! every request. Most operations are a single GET; `traversal` fans out
//! one GET per graph and returns the results in input order.

use std::sync::Arc;

use futures::future::try_join_all;
use reqwest::{header, Client, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::auth::{AuthSession, Session};
use crate::config::Config;

use super::params::{NodeRef, QueryParams, SearchParams, TraversalParams};
use super::url::{build_path, build_url};
use super::{ApiError, GmapError};

// ============================================================================
// Constants
// ============================================================================

/// User agent sent with every request
const USER_AGENT: &str = concat!("gmap-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// API client for GMAP.
/// Clone is cheap: clones share the connection pool and the cached token.
#[derive(Clone)]
pub struct GmapClient {
    client: Client,
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
}

impl GmapClient {
    /// Create a new API client
    pub fn new(config: Config) -> Result<Self, GmapError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(GmapError::Client)?;

        Ok(Self::with_http_client(config, client))
    }

    /// Create a client configured entirely from `GMAP_*` environment variables
    pub fn from_env() -> Result<Self, GmapError> {
        Self::new(Config::from_env())
    }

    /// Create a client on top of an existing `reqwest::Client`
    pub fn with_http_client(config: Config, client: Client) -> Self {
        Self {
            client,
            config: Arc::new(config),
            session: Arc::new(Mutex::new(Session::new())),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ===== Authentication =====

    /// Return the cached session, authenticating first if there is none.
    ///
    /// A cached token is returned as-is; its expiry is not checked. The
    /// session lock is held while the token request is in flight, so
    /// concurrent callers share one request instead of racing.
    ///
    /// No timeout is configured by default, so a hung auth endpoint also
    /// blocks `session`, `set_session` and `clear_session` until the
    /// transport gives up. Pass a `reqwest::Client` with a timeout to
    /// `with_http_client` to bound it.
    pub async fn authenticate(&self) -> Result<AuthSession, GmapError> {
        let mut session = self.session.lock().await;
        if let Some(ref data) = session.data {
            debug!("Reusing cached token");
            return Ok(data.clone());
        }

        let data = self.request_token().await.map_err(|e| {
            warn!(error = %e, "Authentication failed");
            GmapError::Authentication(e)
        })?;

        debug!(expires_at = ?data.expires_at, "Authenticated");
        session.update(data.clone());
        Ok(data)
    }

    /// Snapshot of the cached session, if any
    pub async fn session(&self) -> Option<AuthSession> {
        self.session.lock().await.data.clone()
    }

    /// Use a token obtained elsewhere instead of authenticating
    pub async fn set_session(&self, data: AuthSession) {
        self.session.lock().await.update(data);
    }

    /// Forget the cached token; the next request authenticates again
    pub async fn clear_session(&self) {
        self.session.lock().await.clear();
    }

    async fn request_token(&self) -> Result<AuthSession, ApiError> {
        let url = self.config.auth_url();
        debug!(url = %url, "Requesting token");

        let response = self
            .client
            .post(&url)
            .json(&AuthRequest {
                username: &self.config.username,
                password: &self.config.password,
            })
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let body = response.text().await?;

        serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse auth response: {}", e)))
    }

    // ===== Request primitives =====

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &Url, token: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(url.clone())
            .header(header::AUTHORIZATION, token)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let body = response.text().await?;

        serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse JSON from {}: {}", url, e)))
    }

    /// Authenticated GET of `url`, parsing the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, url: &Url) -> Result<T, GmapError> {
        let auth = self.authenticate().await?;

        debug!(url = %url, "GET");
        self.fetch(url, &auth.token).await.map_err(|source| {
            warn!(url = %url, error = %source, "Request failed");
            GmapError::Request {
                url: url.to_string(),
                source,
            }
        })
    }

    /// Authenticated GET of every URL concurrently, sharing one token.
    ///
    /// Bodies are returned in the order of `urls`. The first failure fails
    /// the whole call; requests still in flight are dropped.
    pub async fn get_all<T: DeserializeOwned>(&self, urls: &[Url]) -> Result<Vec<T>, GmapError> {
        let auth = self.authenticate().await?;
        let token = auth.token.as_str();
        let total = urls.len();

        debug!(count = total, "GET fan-out");
        let requests = urls.iter().enumerate().map(|(index, url)| async move {
            self.fetch(url, token).await.map_err(|source| {
                warn!(url = %url, index, total, error = %source, "Fan-out request failed");
                GmapError::AggregateRequest {
                    index,
                    total,
                    url: url.to_string(),
                    source,
                }
            })
        });

        try_join_all(requests).await
    }

    // ===== Domain Operations =====

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GmapError> {
        build_path(&self.config.api_url, segments)
    }

    /// List all graphs
    pub async fn list_graphs(&self) -> Result<Value, GmapError> {
        let url = self.endpoint(&["graphs"])?;
        self.get(&url).await
    }

    /// List all collections
    pub async fn list_collections(&self) -> Result<Value, GmapError> {
        let url = self.endpoint(&["collections"])?;
        self.get(&url).await
    }

    /// Fetch a single node
    pub async fn get_node(&self, node: &NodeRef) -> Result<Value, GmapError> {
        let url = self.endpoint(&["collections", &node.collection, &node.node_id])?;
        self.get(&url).await
    }

    /// Execute a stored query, binding `value` to its variable
    pub async fn query(&self, params: &QueryParams) -> Result<Value, GmapError> {
        let url = build_url(
            &self.config.api_url,
            &["queries", &params.kind, "execute"],
            &[("variable", params.value.as_str())],
        )?;
        self.get(&url).await
    }

    /// Search the given collections, one page at a time
    pub async fn search(&self, params: &SearchParams) -> Result<Value, GmapError> {
        let url = build_url(
            &self.config.api_url,
            &["collections", "search", ""],
            &params.query_pairs(),
        )?;
        self.get(&url).await
    }

    /// Traverse each graph from the same start vertex.
    ///
    /// Returns one result per graph, in the order of `params.graphs`.
    pub async fn traversal(&self, params: &TraversalParams) -> Result<Vec<Value>, GmapError> {
        let query = params.query_pairs();
        let urls = params
            .graphs
            .iter()
            .map(|graph| {
                build_url(
                    &self.config.api_url,
                    &["graphs", graph, "traversal"],
                    &query,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.get_all(&urls).await
    }

    /// Fetch data exposed by a server plugin.
    ///
    /// `options` become query parameters in iteration order.
    pub async fn plugin_data<I, K, V>(&self, plugin_name: &str, options: I) -> Result<Value, GmapError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        let query: Vec<(K, String)> = options
            .into_iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect();

        let url = build_url(
            &self.config.api_url,
            &["plugin_data", plugin_name, ""],
            &query,
        )?;
        self.get(&url).await
    }
}
