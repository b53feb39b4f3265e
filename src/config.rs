//! Runtime configuration
//!
//! Settings come from explicit values (usually command line arguments) with
//! environment variables as the fallback:
//!
//! | Variable                  | Purpose                                   |
//! |---------------------------|-------------------------------------------|
//! | `GITSCOUT_GITHUB_TOKEN`   | GitHub token, raises rate limits          |
//! | `GITSCOUT_GITHUB_API_URL` | API base URL, e.g. for GitHub Enterprise  |
//! | `GITSCOUT_BACKEND`        | `rest` (default) or `octocrab`            |

use std::str::FromStr;

use url::Url;

use crate::scout::ScoutError;
use crate::scout::providers::ProviderBackend;

pub const GITHUB_TOKEN_ENV: &str = "GITSCOUT_GITHUB_TOKEN";
pub const GITHUB_API_URL_ENV: &str = "GITSCOUT_GITHUB_API_URL";
pub const BACKEND_ENV: &str = "GITSCOUT_BACKEND";

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Configuration shared by the library, the CLI and the MCP server
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// GitHub token; `None` means unauthenticated access (60 requests/hour)
    pub github_token: Option<String>,
    pub api_base_url: Url,
    pub backend: ProviderBackend,
    pub user_agent: String,
}

fn parse_api_base_url(raw: &str) -> Result<Url, ScoutError> {
    Url::parse(raw.trim()).map_err(|e| {
        ScoutError::Configuration(format!("invalid GitHub API URL '{}': {}", raw, e))
    })
}

fn default_user_agent() -> String {
    format!(
        "{}/{} (https://github.com/tacogips/gitscout)",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

/// Drops blank tokens, which GitHub would reject with 401 on every request
fn normalize_token(token: Option<String>) -> Option<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

impl ScoutConfig {
    /// Reads the configuration from the environment
    pub fn from_env() -> Result<Self, ScoutError> {
        Self::resolve(None, None, None)
    }

    /// Resolves explicit values first and falls back to the environment
    pub fn resolve(
        github_token: Option<String>,
        api_base_url: Option<String>,
        backend: Option<String>,
    ) -> Result<Self, ScoutError> {
        let github_token = normalize_token(github_token)
            .or_else(|| normalize_token(std::env::var(GITHUB_TOKEN_ENV).ok()));

        let api_base_url = api_base_url
            .or_else(|| std::env::var(GITHUB_API_URL_ENV).ok())
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());
        let api_base_url = parse_api_base_url(&api_base_url)?;

        let backend = match backend.or_else(|| std::env::var(BACKEND_ENV).ok()) {
            Some(raw) => ProviderBackend::from_str(raw.trim()).map_err(|_| {
                ScoutError::Configuration(format!(
                    "unknown backend '{}', expected 'rest' or 'octocrab'",
                    raw
                ))
            })?,
            None => ProviderBackend::default(),
        };

        Ok(Self {
            github_token,
            api_base_url,
            backend,
            user_agent: default_user_agent(),
        })
    }

    /// Unauthenticated REST configuration for `api_base_url`, ignoring the
    /// environment
    pub fn with_api_base_url(api_base_url: &str) -> Result<Self, ScoutError> {
        Ok(Self {
            github_token: None,
            api_base_url: parse_api_base_url(api_base_url)?,
            backend: ProviderBackend::default(),
            user_agent: default_user_agent(),
        })
    }

    pub fn with_token(mut self, github_token: Option<String>) -> Self {
        self.github_token = normalize_token(github_token);
        self
    }

    pub fn with_backend(mut self, backend: ProviderBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn auth_status(&self) -> &'static str {
        match self.github_token {
            Some(_) => "Authenticated with GitHub token",
            None => "Not authenticated (rate limits apply)",
        }
    }
}
