//! Domain models for repository discovery
//!
//! A [`SearchRequest`] describes what the caller wants, and every stage of the
//! pipeline passes around [`CandidateRepository`] values built from provider
//! pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default number of repositories returned by a search
pub const DEFAULT_MAX_RESULTS: usize = 30;

/// A repository returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRepository {
    /// Fully qualified `owner/name`
    pub full_name: String,

    /// URL for viewing the repository in a browser
    pub url: Url,

    /// Repository description, `None` when absent or blank
    pub description: Option<String>,

    /// Number of stargazers
    pub stars: u64,

    /// When the repository was last updated
    pub updated_at: DateTime<Utc>,
}

impl CandidateRepository {
    pub fn new(
        full_name: impl Into<String>,
        url: Url,
        description: Option<String>,
        stars: u64,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            url,
            description: description.filter(|d| !d.trim().is_empty()),
            stars,
            updated_at,
        }
    }
}

/// Caller-supplied search parameters
///
/// # Examples
///
/// ```
/// use gitscout::scout::SearchRequest;
///
/// let request = SearchRequest::new(["http", "client"])
///     .with_max_results(5)
///     .with_min_stars(100);
/// assert_eq!(request.query(), "http client");
/// assert_eq!(request.max_results(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Keyword terms, combined into a single query
    pub keywords: Vec<String>,

    /// Maximum number of repositories to return
    pub max_results: usize,

    /// Minimum star count, inclusive. Zero disables the filter.
    pub min_stars: u64,

    /// Maximum days since the last update. `None` disables the filter.
    pub max_days_since_update: Option<u32>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            max_results: DEFAULT_MAX_RESULTS,
            min_stars: 0,
            max_days_since_update: None,
        }
    }
}

impl SearchRequest {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_min_stars(mut self, min_stars: u64) -> Self {
        self.min_stars = min_stars;
        self
    }

    pub fn with_max_days_since_update(mut self, days: Option<u32>) -> Self {
        self.max_days_since_update = days;
        self
    }

    /// The keywords joined into the provider query string
    pub fn query(&self) -> String {
        self.keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Requested result count, coerced to at least 1
    pub fn max_results(&self) -> usize {
        self.max_results.max(1)
    }

    /// The recency window in days, if the filter is active
    ///
    /// A zero-day window is treated the same as no window.
    pub fn recency_window_days(&self) -> Option<u32> {
        self.max_days_since_update.filter(|days| *days > 0)
    }
}
