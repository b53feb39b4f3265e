//! Repository providers
//!
//! A provider is the remote code-hosting service the scout queries. The rest
//! of the crate only talks to it through [`RepositoryProvider`], so the pool
//! acquirer and the README fetcher can be exercised against an in-memory
//! implementation in tests.

use std::future::Future;

pub mod github;
pub mod models;

pub use github::{GithubClient, GithubProvider, OctocrabGithubClient, ProviderBackend};
pub use models::{ProviderError, ReadmePayload, SearchPageRequest};

use super::models::CandidateRepository;

/// Remote search and document-retrieval operations consumed by the scout
///
/// Implementations map provider responses into [`CandidateRepository`] values
/// and classify failures into [`ProviderError`]. They must not retry; the
/// caller decides whether a failure is fatal.
pub trait RepositoryProvider: Send + Sync {
    /// Fetches a single page of repository search results
    fn search_page(
        &self,
        request: &SearchPageRequest,
    ) -> impl Future<Output = Result<Vec<CandidateRepository>, ProviderError>> + Send;

    /// Fetches the still-encoded README of `owner/repo`
    ///
    /// A repository without a README yields [`ProviderError::NotFound`].
    fn fetch_readme(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl Future<Output = Result<ReadmePayload, ProviderError>> + Send;
}
