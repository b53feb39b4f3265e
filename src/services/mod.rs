//! Service functions shared by the MCP tools and the CLI
//!
//! These functions take an explicit [`RepositoryScout`] instead of reaching for
//! the global instance, which keeps them testable against any provider.

use crate::scout::models::DEFAULT_MAX_RESULTS;
use crate::scout::{RepositoryProvider, RepositoryScout, SearchRequest};
use crate::tools::responses::{ReadmeResponse, SearchRepositoriesResponse};

/// Splits free-form text into search keywords
///
/// ```
/// use gitscout::services::split_keywords;
///
/// assert_eq!(split_keywords("  http   client "), vec!["http", "client"]);
/// ```
pub fn split_keywords(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Builds a [`SearchRequest`] from optional tool or CLI parameters
///
/// Missing values fall back to the defaults: 30 results, no star threshold
/// and no recency window.
pub fn build_search_request(
    keywords: Vec<String>,
    max_results: Option<usize>,
    min_stars: Option<u64>,
    max_days_since_update: Option<u32>,
) -> Result<SearchRequest, String> {
    let keywords: Vec<String> = keywords
        .iter()
        .flat_map(|k| split_keywords(k))
        .collect();

    if keywords.is_empty() {
        return Err("At least one non-empty keyword is required".to_string());
    }

    Ok(SearchRequest::new(keywords)
        .with_max_results(max_results.unwrap_or(DEFAULT_MAX_RESULTS))
        .with_min_stars(min_stars.unwrap_or(0))
        .with_max_days_since_update(max_days_since_update))
}

/// Runs the search pipeline and wraps the ranked repositories in a response
pub async fn search_repositories<P: RepositoryProvider>(
    scout: &RepositoryScout<P>,
    request: &SearchRequest,
) -> Result<SearchRepositoriesResponse, String> {
    let repositories = scout
        .search(request)
        .await
        .map_err(|e| format!("Search failed: {}", e))?;

    Ok(SearchRepositoriesResponse::new(request.query(), repositories))
}

/// Looks up a README; never fails
pub async fn fetch_readme<P: RepositoryProvider>(
    scout: &RepositoryScout<P>,
    repository: &str,
) -> ReadmeResponse {
    let content = scout.fetch_readme(repository).await;
    ReadmeResponse::new(repository.trim(), content)
}
