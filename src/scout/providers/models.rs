//! Provider-agnostic request and error types
//!
//! These types describe what the scout asks of a provider and how a provider
//! reports failure, independently of the wire format of any vendor API.

use thiserror::Error;

/// Page size ceiling enforced by the provider
pub const MAX_PER_PAGE: usize = 100;

/// Sort key of every search page: last update time
pub const SEARCH_SORT: &str = "updated";

/// Sort order of every search page: newest first
pub const SEARCH_ORDER: &str = "desc";

/// A single page of keyword search results
///
/// Pages are always ordered by [`SEARCH_SORT`] in [`SEARCH_ORDER`], so page
/// `n + 1` continues where page `n` stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPageRequest {
    /// Combined keyword query
    pub query: String,
    /// Items per page, never above [`MAX_PER_PAGE`]
    pub per_page: u8,
    /// 1-based page number
    pub page: u32,
}

impl SearchPageRequest {
    /// Builds a request for the most recently updated repositories first
    pub fn recently_updated(query: impl Into<String>, per_page: usize, page: u32) -> Self {
        Self {
            query: query.into(),
            per_page: per_page.clamp(1, MAX_PER_PAGE) as u8,
            page,
        }
    }
}

/// README body as returned by the provider, before decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmePayload {
    /// Encoded content, possibly wrapped over several lines
    pub content: String,
    /// Encoding name reported by the provider, usually `base64`
    pub encoding: String,
}

/// Failure classes reported by a provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("GitHub API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound(_))
    }
}
