//! Shared fixtures for the integration tests
//!
//! [`InMemoryProvider`] serves a fixed list of repositories in pages, the way
//! GitHub serves a search result set, and records every page request.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use gitscout::scout::CandidateRepository;
use gitscout::scout::providers::{
    ProviderError, ReadmePayload, RepositoryProvider, SearchPageRequest,
};

/// Reference time used by the tests
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap()
}

/// Midnight of the given day in October 2026
pub fn october(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, day, 0, 0, 0).unwrap()
}

pub fn repo(full_name: &str, stars: u64, updated_at: DateTime<Utc>) -> CandidateRepository {
    CandidateRepository::new(
        full_name,
        format!("https://github.com/{}", full_name).parse().unwrap(),
        Some(format!("{} description", full_name)),
        stars,
        updated_at,
    )
}

/// `count` repositories ordered by most recently updated first
pub fn generated_repos(count: usize) -> Vec<CandidateRepository> {
    (0..count)
        .map(|i| {
            repo(
                &format!("owner{}/repo{}", i % 7, i),
                ((i * 37) % 1000) as u64,
                now() - Duration::hours(i as i64),
            )
        })
        .collect()
}

pub struct InMemoryProvider {
    repositories: Vec<CandidateRepository>,
    fail_on_page: Option<u32>,
    readmes: HashMap<String, ReadmePayload>,
    readme_error: bool,
    requests: Mutex<Vec<SearchPageRequest>>,
}

impl InMemoryProvider {
    pub fn new(repositories: Vec<CandidateRepository>) -> Self {
        Self {
            repositories,
            fail_on_page: None,
            readmes: HashMap::new(),
            readme_error: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Makes the given page fail with a server error
    pub fn failing_on_page(mut self, page: u32) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    pub fn with_readme(mut self, full_name: &str, content: &str, encoding: &str) -> Self {
        self.readmes.insert(
            full_name.to_string(),
            ReadmePayload {
                content: content.to_string(),
                encoding: encoding.to_string(),
            },
        );
        self
    }

    /// Makes every README lookup fail with a rate limit error
    pub fn with_readme_errors(mut self) -> Self {
        self.readme_error = true;
        self
    }

    pub fn requests(&self) -> Vec<SearchPageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl RepositoryProvider for InMemoryProvider {
    async fn search_page(
        &self,
        request: &SearchPageRequest,
    ) -> Result<Vec<CandidateRepository>, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());

        if self.fail_on_page == Some(request.page) {
            return Err(ProviderError::Api {
                status: 500,
                message: "internal server error".to_string(),
            });
        }

        let per_page = usize::from(request.per_page);
        let start = (request.page as usize - 1) * per_page;
        let end = (start + per_page).min(self.repositories.len());

        if start >= end {
            return Ok(Vec::new());
        }

        Ok(self.repositories[start..end].to_vec())
    }

    async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<ReadmePayload, ProviderError> {
        if self.readme_error {
            return Err(ProviderError::RateLimited("API rate limit exceeded".to_string()));
        }

        let full_name = format!("{}/{}", owner, repo);
        self.readmes
            .get(&full_name)
            .cloned()
            .ok_or(ProviderError::NotFound(full_name))
    }
}
