//! gitscout: GitHub repository discovery and ranking
//!
//! Finds repositories matching a set of keywords, filters them by popularity
//! and recent activity, and ranks the survivors by a blend of stars and
//! freshness. READMEs can be fetched for any repository in the results.
//!
//! ## Features
//!
//! - Widened candidate pool: three times the requested result count, fetched
//!   page by page within GitHub's 1000-result search window
//! - Minimum star and maximum staleness filters
//! - Composite score: `0.7 * normalized_stars + 0.3 * normalized_recency`
//! - README retrieval that never fails the caller
//!
//! ## Authentication
//!
//! A GitHub token is optional. It is read from `GITSCOUT_GITHUB_TOKEN` unless
//! one is passed explicitly.
//!
//! - Without token: 60 requests/hour
//! - With token: 5,000 requests/hour
//!
//! ```bash
//! export GITSCOUT_GITHUB_TOKEN=your_github_token
//! ```
//!
//! ## Usage
//!
//! This library can be used in several ways:
//! - As an MCP server (`gitscout stdio` / `gitscout http`)
//! - From the terminal (`gitscout-cli search http client --min-stars 100`)
//! - Directly as a Rust library through [`scout::RepositoryScout`]
//!
//! ## Process-Wide RepositoryScout
//!
//! The MCP server shares a single scout, and therefore a single HTTP client,
//! across all tool calls:
//!
//! ```no_run
//! use gitscout::config::ScoutConfig;
//! use gitscout::scout::instance;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scout = instance::init_repository_scout(&ScoutConfig::from_env()?)?;
//!
//! // Later access returns the same instance
//! let same = instance::get_repository_scout()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod scout;
pub mod services;
pub mod tools;
pub mod transport;
