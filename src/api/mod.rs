//! REST API client module for the GMAP graph-data service.
//!
//! This module provides the `GmapClient` for listing graphs and
//! collections, fetching nodes, running stored queries, searching,
//! traversing graphs and reading plugin data.
//!
//! The API authenticates with a token obtained from `POST {api_url}/auth/`
//! and sent verbatim in the `Authorization` header.

pub mod client;
pub mod error;
pub mod params;
pub mod url;

pub use client::GmapClient;
pub use error::{ApiError, GmapError};
pub use params::{NodeRef, QueryParams, SearchParams, TraversalParams};
