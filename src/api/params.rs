//! Parameter types for the GMAP domain operations.

use serde::{Deserialize, Serialize};

/// A node addressed by collection and id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
    pub collection: String,
    pub node_id: String,
}

impl NodeRef {
    pub fn new(collection: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            node_id: node_id.into(),
        }
    }
}

/// A stored query and the value bound to its `variable`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub kind: String,
    pub value: String,
}

impl QueryParams {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// Full-text search over one or more collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Sent as a single comma-separated `collections` parameter
    pub collections: Vec<String>,
    pub query: String,
    pub per_page: u32,
    pub page: u32,
}

impl SearchParams {
    pub fn new<I, S>(collections: I, query: impl Into<String>, per_page: u32, page: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            collections: collections.into_iter().map(Into::into).collect(),
            query: query.into(),
            per_page,
            page,
        }
    }

    pub(crate) fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("collections", self.collections.join(",")),
            ("query", self.query.clone()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
        ]
    }
}

/// Traversal of one or more graphs from a common start vertex.
///
/// Each graph becomes its own request; results come back in `graphs` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalParams {
    pub graphs: Vec<String>,
    pub start_vertex: String,
    pub max_depth: u32,
    /// Edge direction understood by the server, e.g. `"in"`, `"out"` or `"any"`
    pub direction: String,
}

impl TraversalParams {
    pub fn new<I, S>(
        graphs: I,
        start_vertex: impl Into<String>,
        max_depth: u32,
        direction: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            graphs: graphs.into_iter().map(Into::into).collect(),
            start_vertex: start_vertex.into(),
            max_depth,
            direction: direction.into(),
        }
    }

    pub(crate) fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("start_vertex", self.start_vertex.clone()),
            ("max_depth", self.max_depth.to_string()),
            ("direction", self.direction.clone()),
        ]
    }
}
