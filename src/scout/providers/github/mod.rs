mod octocrab_client;

pub use octocrab_client::OctocrabGithubClient;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};
use url::Url;

use super::models::{ProviderError, ReadmePayload, SEARCH_ORDER, SEARCH_SORT, SearchPageRequest};
use super::RepositoryProvider;
use crate::config::ScoutConfig;
use crate::scout::error::ScoutError;
use crate::scout::models::CandidateRepository;

/// Which GitHub client implementation backs the scout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderBackend {
    /// Hand-built REST requests over reqwest
    #[default]
    Rest,
    /// The octocrab SDK
    Octocrab,
}

/// REST client for the GitHub search and contents APIs
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    github_token: Option<String>,
    api_base_url: String,
    user_agent: String,
}

/// GitHub-specific search response structure
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct GitHubRepositorySearchResponse {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    incomplete_results: bool,
    #[serde(default)]
    items: Vec<GitHubRepositoryItem>,
}

/// The subset of a GitHub repository item the scout reads
#[derive(Debug, Deserialize)]
struct GitHubRepositoryItem {
    full_name: String,
    html_url: String,
    description: Option<String>,
    stargazers_count: u64,
    updated_at: DateTime<Utc>,
}

/// GitHub contents API response for a README
#[derive(Debug, Deserialize)]
struct GitHubReadmeResponse {
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

impl GitHubRepositoryItem {
    fn into_candidate(self) -> Result<CandidateRepository, ProviderError> {
        let url = self.html_url.parse::<Url>().map_err(|e| {
            ProviderError::Malformed(format!(
                "invalid html_url '{}' for {}: {}",
                self.html_url, self.full_name, e
            ))
        })?;

        Ok(CandidateRepository::new(
            self.full_name,
            url,
            self.description,
            self.stargazers_count,
            self.updated_at,
        ))
    }
}

impl GithubClient {
    pub fn new(
        client: Client,
        github_token: Option<String>,
        api_base_url: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        GithubClient {
            client,
            github_token,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
        }
    }

    /// Builds a client from the scout configuration
    pub fn from_config(config: &ScoutConfig) -> Result<Self, ScoutError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ScoutError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::new(
            client,
            config.github_token.clone(),
            config.api_base_url.as_str(),
            config.user_agent.clone(),
        ))
    }

    /// Constructs the GitHub API URL for one page of repository search
    ///
    /// Example URL:
    /// `https://api.github.com/search/repositories?q=http%20client&sort=updated&order=desc&per_page=90&page=1`
    fn construct_search_url(&self, request: &SearchPageRequest) -> String {
        format!(
            "{}/search/repositories?q={}&sort={}&order={}&per_page={}&page={}",
            self.api_base_url,
            urlencoding::encode(&request.query),
            SEARCH_SORT,
            SEARCH_ORDER,
            request.per_page,
            request.page
        )
    }

    fn construct_readme_url(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}/readme",
            self.api_base_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        )
    }

    fn request(&self, url: String) -> reqwest::RequestBuilder {
        let mut req_builder = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = self.github_token.as_ref() {
            req_builder = req_builder.header("Authorization", format!("token {}", token));
        }

        req_builder
    }

    /// Executes a GitHub API search repository request
    ///
    /// Returns the page mapped into candidates, in the order GitHub returned them.
    pub async fn execute_search_repository_request(
        &self,
        request: &SearchPageRequest,
    ) -> Result<Vec<CandidateRepository>, ProviderError> {
        let url = self.construct_search_url(request);
        tracing::debug!("Searching repositories: {}", url);

        let response = self
            .request(url)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("Failed to search repositories: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "search/repositories").await);
        }

        let github_response: GitHubRepositorySearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("Failed to parse GitHub response: {}", e)))?;

        github_response
            .items
            .into_iter()
            .map(GitHubRepositoryItem::into_candidate)
            .collect()
    }

    /// Fetches the README of a repository through the contents API
    pub async fn get_readme(&self, owner: &str, repo: &str) -> Result<ReadmePayload, ProviderError> {
        let url = self.construct_readme_url(owner, repo);
        tracing::debug!("Fetching README: {}", url);

        let response = self
            .request(url)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("Failed to fetch README: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, &format!("{}/{}", owner, repo)).await);
        }

        let readme: GitHubReadmeResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("Failed to parse GitHub response: {}", e)))?;

        Ok(ReadmePayload {
            content: readme.content,
            encoding: readme.encoding,
        })
    }
}

impl RepositoryProvider for GithubClient {
    async fn search_page(
        &self,
        request: &SearchPageRequest,
    ) -> Result<Vec<CandidateRepository>, ProviderError> {
        self.execute_search_repository_request(request).await
    }

    async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<ReadmePayload, ProviderError> {
        self.get_readme(owner, repo).await
    }
}

async fn error_from_response(response: reqwest::Response, resource: &str) -> ProviderError {
    let status = response.status().as_u16();
    let rate_limit_exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim() == "0")
        .unwrap_or(false);

    let error_text = match response.text().await {
        Ok(text) => text,
        Err(_) => "Unknown error".to_string(),
    };

    classify_error_status(status, rate_limit_exhausted, resource, error_text)
}

/// Maps a non-success HTTP status into a provider error
fn classify_error_status(
    status: u16,
    rate_limit_exhausted: bool,
    resource: &str,
    message: String,
) -> ProviderError {
    match status {
        404 => ProviderError::NotFound(resource.to_string()),
        429 => ProviderError::RateLimited(message),
        403 if rate_limit_exhausted => ProviderError::RateLimited(message),
        status => ProviderError::Api { status, message },
    }
}

/// GitHub provider selected by [`ProviderBackend`]
#[derive(Debug, Clone)]
pub enum GithubProvider {
    Rest(GithubClient),
    Octocrab(OctocrabGithubClient),
}

impl GithubProvider {
    pub fn from_config(config: &ScoutConfig) -> Result<Self, ScoutError> {
        match config.backend {
            ProviderBackend::Rest => Ok(GithubProvider::Rest(GithubClient::from_config(config)?)),
            ProviderBackend::Octocrab => Ok(GithubProvider::Octocrab(
                OctocrabGithubClient::from_config(config)?,
            )),
        }
    }
}

impl RepositoryProvider for GithubProvider {
    async fn search_page(
        &self,
        request: &SearchPageRequest,
    ) -> Result<Vec<CandidateRepository>, ProviderError> {
        match self {
            GithubProvider::Rest(client) => client.search_page(request).await,
            GithubProvider::Octocrab(client) => client.search_page(request).await,
        }
    }

    async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<ReadmePayload, ProviderError> {
        match self {
            GithubProvider::Rest(client) => client.fetch_readme(owner, repo).await,
            GithubProvider::Octocrab(client) => client.fetch_readme(owner, repo).await,
        }
    }
}
