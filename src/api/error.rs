use thiserror::Error;

/// Why a single HTTP exchange with the API failed.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized - credentials or token rejected")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limited by server")]
    RateLimited,

    #[error("Server error ({status}): {body}")]
    ServerError {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(truncated),
            404 => ApiError::NotFound(truncated),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError {
                status,
                body: truncated,
            },
            _ => ApiError::UnexpectedStatus {
                status,
                body: truncated,
            },
        }
    }

    /// HTTP status behind this error, when the server answered
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        use reqwest::StatusCode;

        match self {
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ApiError::AccessDenied(_) => Some(StatusCode::FORBIDDEN),
            ApiError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ApiError::RateLimited => Some(StatusCode::TOO_MANY_REQUESTS),
            ApiError::ServerError { status, .. } | ApiError::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            ApiError::NetworkError(e) => e.status(),
            ApiError::InvalidResponse(_) => None,
        }
    }
}

/// Errors returned by `GmapClient` operations.
#[derive(Error, Debug)]
pub enum GmapError {
    /// The token request failed; nothing was cached.
    #[error("Authentication failed: {0}")]
    Authentication(#[source] ApiError),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: ApiError,
    },

    /// One member of a fanned-out request failed; sibling results are discarded.
    #[error("Request {index} of {total} ({url}) failed: {source}")]
    AggregateRequest {
        index: usize,
        total: usize,
        url: String,
        #[source]
        source: ApiError,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl GmapError {
    /// The underlying HTTP failure, if any
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            GmapError::Authentication(e)
            | GmapError::Request { source: e, .. }
            | GmapError::AggregateRequest { source: e, .. } => Some(e),
            GmapError::InvalidUrl(_) | GmapError::Client(_) => None,
        }
    }
}
