//! Async client for the GMAP graph-data API.
//!
//! The client authenticates once against `{api_url}/auth/`, caches the
//! token, and exposes the API's read operations: graphs, collections,
//! nodes, stored queries, search, traversals and plugin data.
//!
//! ```no_run
//! use gmap_client::{ClientOptions, Config, GmapClient, NodeRef};
//!
//! # async fn run() -> Result<(), gmap_client::GmapError> {
//! let config = Config::from_options(ClientOptions::default().api_url("http://gmap.local"));
//! let client = GmapClient::new(config)?;
//! let node = client.get_node(&NodeRef::new("people", "42")).await?;
//! println!("{}", node);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;

pub use api::{
    ApiError, GmapClient, GmapError, NodeRef, QueryParams, SearchParams, TraversalParams,
};
pub use auth::{AuthSession, ExpiresAt};
pub use config::{ClientOptions, Config};
