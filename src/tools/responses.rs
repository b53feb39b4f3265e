//! Response types for the gitscout MCP server
//!
//! These types are serialized to JSON and returned by the MCP tool methods and
//! by `gitscout-cli --json`, so both surfaces share one format.
//!
//! ## search_repositories
//!
//! ```json
//! {
//!   "query": "http client",
//!   "total": 1,
//!   "repositories": [
//!     {
//!       "full_name": "hyperium/hyper",
//!       "url": "https://github.com/hyperium/hyper",
//!       "description": "An HTTP library for Rust",
//!       "stars": 15000,
//!       "updated_at": "2026-10-01T12:00:00Z"
//!     }
//!   ]
//! }
//! ```
//!
//! ## fetch_readme
//!
//! ```json
//! {"repository": "hyperium/hyper", "found": true, "content": "# hyper ..."}
//! ```

use serde::{Deserialize, Serialize};

use crate::scout::CandidateRepository;

/// Ranked search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRepositoriesResponse {
    /// The keyword query sent to the provider
    pub query: String,

    /// Number of repositories in `repositories`
    pub total: usize,

    /// Repositories in ranked order, best first
    pub repositories: Vec<CandidateRepository>,
}

impl SearchRepositoriesResponse {
    pub fn new(query: String, repositories: Vec<CandidateRepository>) -> Self {
        Self {
            query,
            total: repositories.len(),
            repositories,
        }
    }
}

/// Outcome of a README lookup
///
/// `found` is false and `content` is absent when the repository has no README
/// or the lookup failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadmeResponse {
    pub repository: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ReadmeResponse {
    pub fn new(repository: impl Into<String>, content: Option<String>) -> Self {
        Self {
            repository: repository.into(),
            found: content.is_some(),
            content,
        }
    }
}

/// Serializes a response for the MCP tool result
pub fn to_json<T: Serialize>(response: &T) -> Result<String, String> {
    serde_json::to_string(response).map_err(|e| format!("Failed to serialize response: {}", e))
}
