//! Repository discovery and ranking
//!
//! This module provides:
//! - Keyword search over GitHub with a widened, paginated candidate pool
//! - Star and recency filtering
//! - Composite ranking (70% stars, 30% recency)
//! - README retrieval
//!
//! ## Authentication
//!
//! Requests can be authenticated with a GitHub token, either passed through
//! [`crate::config::ScoutConfig`] or read from the environment:
//!
//! ```bash
//! # Authentication is optional but recommended to avoid rate limiting
//! export GITSCOUT_GITHUB_TOKEN=your_github_token
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use gitscout::config::ScoutConfig;
//! use gitscout::scout::{RepositoryScout, SearchRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scout = RepositoryScout::from_config(&ScoutConfig::from_env()?)?;
//!
//! let request = SearchRequest::new(["http", "client"]).with_min_stars(100);
//! for repo in scout.search(&request).await? {
//!     println!("{} ({} stars)", repo.full_name, repo.stars);
//! }
//!
//! let readme = scout.fetch_readme("hyperium/hyper").await;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod instance;
pub mod models;
pub mod pool;
pub mod progress;
pub mod providers;
pub mod ranking;
pub mod readme;

use std::sync::Arc;

use chrono::{DateTime, Utc};

pub use error::ScoutError;
pub use models::{CandidateRepository, SearchRequest};
pub use progress::{ProgressEvent, ProgressReporter, TracingProgress};
pub use providers::{GithubProvider, ProviderError, RepositoryProvider};

use crate::config::ScoutConfig;

/// Entry point for repository search and README retrieval
///
/// Holds no mutable state, so clones can be used from concurrent tasks.
#[derive(Clone)]
pub struct RepositoryScout<P = GithubProvider> {
    provider: P,
    progress: Arc<dyn ProgressReporter>,
}

impl RepositoryScout<GithubProvider> {
    /// Creates a scout backed by the GitHub client selected in `config`
    pub fn from_config(config: &ScoutConfig) -> Result<Self, ScoutError> {
        Ok(Self::new(GithubProvider::from_config(config)?))
    }
}

impl<P: RepositoryProvider> RepositoryScout<P> {
    /// Creates a scout that reports progress through `tracing`
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            progress: Arc::new(TracingProgress),
        }
    }

    /// Replaces the progress reporter
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Searches, filters and ranks repositories for `request`
    ///
    /// Fails if any page request fails; partial pools are never ranked.
    pub async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<CandidateRepository>, ScoutError> {
        self.search_at(request, Utc::now()).await
    }

    /// Same as [`Self::search`] with an explicit reference time for the
    /// recency filter
    pub async fn search_at(
        &self,
        request: &SearchRequest,
        now: DateTime<Utc>,
    ) -> Result<Vec<CandidateRepository>, ScoutError> {
        let query = request.query();

        self.progress.report(ProgressEvent::SearchStarted {
            query: query.clone(),
            min_stars: request.min_stars,
            max_days_since_update: request.recency_window_days(),
        });

        let pool = pool::acquire_pool(
            &self.provider,
            &query,
            request.max_results(),
            self.progress.as_ref(),
        )
        .await?;

        Ok(ranking::rank_and_select(
            pool.candidates,
            request,
            now,
            self.progress.as_ref(),
        ))
    }

    /// Fetches the decoded README of `owner/name`
    ///
    /// Never fails: a missing README or any provider error yields `None`.
    pub async fn fetch_readme(&self, full_name: &str) -> Option<String> {
        readme::fetch_readme(&self.provider, full_name).await
    }
}
