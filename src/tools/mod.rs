//! MCP tools for repository discovery
//!
//! [`GitScoutTools`] exposes the scout through the Model Context Protocol:
//! - `search_repositories`: keyword search with star and recency filters,
//!   ranked by popularity and freshness
//! - `fetch_readme`: decoded README of a repository

pub mod responses;

use rmcp::{ServerHandler, model::*, schemars, tool};

use crate::config::ScoutConfig;
use crate::scout::instance;
use crate::scout::{RepositoryScout, ScoutError};
use crate::services;

/// Wrapper for the repository scout exposed through the MCP protocol
#[derive(Clone)]
pub struct GitScoutTools {
    scout: RepositoryScout,
    auth_status: &'static str,
}

impl GitScoutTools {
    /// Creates the tools on top of the process-wide scout
    ///
    /// The global scout is initialized from `config` on first use; later
    /// calls share the existing instance.
    pub fn new(config: &ScoutConfig) -> Result<Self, ScoutError> {
        let scout = instance::init_repository_scout(config)?;
        Ok(Self {
            scout: scout.clone(),
            auth_status: config.auth_status(),
        })
    }

    /// Creates the tools around an explicit scout
    pub fn with_scout(scout: RepositoryScout, auth_status: &'static str) -> Self {
        Self { scout, auth_status }
    }
}

#[tool(tool_box)]
impl ServerHandler for GitScoutTools {
    fn get_info(&self) -> ServerInfo {
        let instructions = format!(
            "# gitscout MCP Server

## Authentication Status
{}

## Available Tools
- `search_repositories`: Find GitHub repositories by keyword, ranked by stars (70%) and recent activity (30%)
- `fetch_readme`: Read the README of a repository

## Authentication
### Option 1: Command Line Argument (highest priority)
```
gitscout stdio --github-token=your_token
gitscout http --github-token=your_token
```

### Option 2: Environment Variable (used as fallback)
```
export GITSCOUT_GITHUB_TOKEN=your_github_token
```

A token is optional but raises the rate limit from 60 to 5,000 requests/hour.
",
            self.auth_status
        );

        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(instructions),
        }
    }
}

#[tool(tool_box)]
impl GitScoutTools {
    /// Search, filter and rank GitHub repositories
    ///
    /// Fetches up to three times `max_results` recently updated candidates
    /// (never more than 1000), drops those below `min_stars` or not updated
    /// within `max_days_since_update` days, and ranks the rest.
    #[tool(
        description = "Discover GitHub repositories by keyword. Collects a pool of recently updated repositories, filters by minimum stars and days since last update, then ranks by a blend of stars (70%) and recency (30%). Returns JSON with the ranked repositories. Example usage: `{\"name\": \"search_repositories\", \"arguments\": {\"keywords\": [\"http\", \"client\"]}}`. With filters: `{\"name\": \"search_repositories\", \"arguments\": {\"keywords\": [\"rust\", \"orm\"], \"max_results\": 5, \"min_stars\": 100, \"max_days_since_update\": 90}}`"
    )]
    async fn search_repositories(
        &self,
        #[tool(param)]
        #[schemars(
            description = "Keywords (required) - combined into a single search query. Each entry may contain several space-separated words."
        )]
        keywords: Vec<String>,

        #[tool(param)]
        #[schemars(
            description = "Maximum number of repositories to return (optional, default is 30). Values below 1 are treated as 1."
        )]
        max_results: Option<usize>,

        #[tool(param)]
        #[schemars(
            description = "Minimum number of stars, inclusive (optional, default is 0 meaning no star filter)."
        )]
        min_stars: Option<u64>,

        #[tool(param)]
        #[schemars(
            description = "Only keep repositories updated within this many days (optional, omit for no recency filter)."
        )]
        max_days_since_update: Option<u32>,
    ) -> Result<String, String> {
        let request =
            services::build_search_request(keywords, max_results, min_stars, max_days_since_update)?;

        let response = services::search_repositories(&self.scout, &request)
            .await
            .inspect_err(|e| tracing::error!("{}", e))?;

        responses::to_json(&response)
    }

    /// Fetch the decoded README of a repository
    #[tool(
        description = "Fetch the README of a GitHub repository as plain text. Returns JSON with `found: false` when the repository has no README or it cannot be retrieved. Example usage: `{\"name\": \"fetch_readme\", \"arguments\": {\"repository\": \"tokio-rs/tokio\"}}`"
    )]
    async fn fetch_readme(
        &self,
        #[tool(param)]
        #[schemars(description = "Repository in 'owner/name' form (required), e.g. 'hyperium/hyper'.")]
        repository: String,
    ) -> Result<String, String> {
        let response = services::fetch_readme(&self.scout, &repository).await;
        responses::to_json(&response)
    }
}
