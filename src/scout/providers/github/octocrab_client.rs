//! Octocrab-based GitHub client implementation
//!
//! This module provides the same provider operations as [`super::GithubClient`]
//! on top of the octocrab SDK.

use octocrab::models::Repository as OctocrabRepository;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::{Octocrab, Page};

use crate::config::ScoutConfig;
use crate::scout::error::ScoutError;
use crate::scout::models::CandidateRepository;
use crate::scout::providers::models::{
    ProviderError, ReadmePayload, SEARCH_ORDER, SEARCH_SORT, SearchPageRequest,
};
use crate::scout::providers::RepositoryProvider;

/// Octocrab-based GitHub client
#[derive(Debug, Clone)]
pub struct OctocrabGithubClient {
    client: Octocrab,
}

impl OctocrabGithubClient {
    /// Create a new OctocrabGithubClient against `api_base_url`
    ///
    /// Octocrab's built-in retries are disabled so that every page costs
    /// exactly one request, as with the REST client.
    pub fn new(github_token: Option<String>, api_base_url: &str) -> Result<Self, ScoutError> {
        let builder = Octocrab::builder()
            .add_retry_config(RetryConfig::None)
            .base_uri(api_base_url)
            .map_err(|e| {
                ScoutError::Configuration(format!(
                    "Invalid GitHub API URL '{}': {}",
                    api_base_url, e
                ))
            })?;

        let client = if let Some(token) = github_token {
            builder.personal_token(token).build()
        } else {
            builder.build()
        }
        .map_err(|e| ScoutError::Configuration(format!("Failed to create octocrab client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn from_config(config: &ScoutConfig) -> Result<Self, ScoutError> {
        Self::new(config.github_token.clone(), config.api_base_url.as_str())
    }

    /// Search repositories using octocrab
    pub async fn search_repositories(
        &self,
        request: &SearchPageRequest,
    ) -> Result<Vec<CandidateRepository>, ProviderError> {
        let results = self
            .client
            .search()
            .repositories(&request.query)
            .sort(SEARCH_SORT)
            .order(SEARCH_ORDER)
            .per_page(request.per_page)
            .page(request.page)
            .send()
            .await
            .map_err(|e| classify_octocrab_error(e, "search/repositories"))?;

        Self::convert_repository_search_results(results)
    }

    /// Fetch the README of a repository using octocrab
    pub async fn get_readme(&self, owner: &str, repo: &str) -> Result<ReadmePayload, ProviderError> {
        let content = self
            .client
            .repos(owner, repo)
            .get_readme()
            .send()
            .await
            .map_err(|e| classify_octocrab_error(e, &format!("{}/{}", owner, repo)))?;

        Ok(ReadmePayload {
            content: content.content.unwrap_or_default(),
            encoding: content.encoding.unwrap_or_else(|| "base64".to_string()),
        })
    }

    /// Convert octocrab repository search results to candidates
    fn convert_repository_search_results(
        results: Page<OctocrabRepository>,
    ) -> Result<Vec<CandidateRepository>, ProviderError> {
        results
            .items
            .into_iter()
            .map(Self::convert_repository)
            .collect()
    }

    fn convert_repository(repo: OctocrabRepository) -> Result<CandidateRepository, ProviderError> {
        let full_name = repo
            .full_name
            .ok_or_else(|| ProviderError::Malformed(format!("repository {} has no full_name", repo.name)))?;

        let url = repo
            .html_url
            .ok_or_else(|| ProviderError::Malformed(format!("{} has no html_url", full_name)))?;

        let stars = repo
            .stargazers_count
            .ok_or_else(|| ProviderError::Malformed(format!("{} has no stargazers_count", full_name)))?;

        let updated_at = repo
            .updated_at
            .ok_or_else(|| ProviderError::Malformed(format!("{} has no updated_at", full_name)))?;

        Ok(CandidateRepository::new(
            full_name,
            url,
            repo.description,
            u64::from(stars),
            updated_at,
        ))
    }
}

impl RepositoryProvider for OctocrabGithubClient {
    async fn search_page(
        &self,
        request: &SearchPageRequest,
    ) -> Result<Vec<CandidateRepository>, ProviderError> {
        self.search_repositories(request).await
    }

    async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<ReadmePayload, ProviderError> {
        self.get_readme(owner, repo).await
    }
}

fn classify_octocrab_error(error: octocrab::Error, resource: &str) -> ProviderError {
    match error {
        octocrab::Error::GitHub { source, .. } => match source.status_code.as_u16() {
            404 => ProviderError::NotFound(resource.to_string()),
            429 => ProviderError::RateLimited(source.message),
            403 if source.message.to_lowercase().contains("rate limit") => {
                ProviderError::RateLimited(source.message)
            }
            status => ProviderError::Api {
                status,
                message: source.message,
            },
        },
        octocrab::Error::Serde { source, .. } => ProviderError::Malformed(source.to_string()),
        octocrab::Error::Json { source, .. } => ProviderError::Malformed(source.to_string()),
        other => ProviderError::Transport(other.to_string()),
    }
}
