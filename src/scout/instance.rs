//! Global RepositoryScout instance
//!
//! This module provides a process-wide [`RepositoryScout`] using once_cell, so
//! every MCP call in the same process shares one HTTP client.

use once_cell::sync::OnceCell;

use super::{RepositoryScout, ScoutError};
use crate::config::ScoutConfig;

/// Global RepositoryScout instance
static GLOBAL_REPOSITORY_SCOUT: OnceCell<RepositoryScout> = OnceCell::new();

/// Initialize the global RepositoryScout with the given configuration
///
/// Only the first successful call has an effect; later calls return the
/// existing instance and ignore `config`.
pub fn init_repository_scout(config: &ScoutConfig) -> Result<&'static RepositoryScout, ScoutError> {
    GLOBAL_REPOSITORY_SCOUT.get_or_try_init(|| RepositoryScout::from_config(config))
}

/// Get the global RepositoryScout instance
///
/// If the global instance hasn't been initialized yet, it is initialized from
/// the environment.
pub fn get_repository_scout() -> Result<&'static RepositoryScout, ScoutError> {
    GLOBAL_REPOSITORY_SCOUT.get_or_try_init(|| {
        let config = ScoutConfig::from_env()?;
        RepositoryScout::from_config(&config)
    })
}
