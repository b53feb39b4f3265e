use thiserror::Error;

use super::providers::ProviderError;

/// Errors surfaced by the search pipeline
#[derive(Debug, Error)]
pub enum ScoutError {
    /// A provider call failed while the candidate pool was being acquired
    #[error("repository search failed on page {page}: {source}")]
    Acquisition {
        page: u32,
        #[source]
        source: ProviderError,
    },

    #[error("invalid configuration: {0}")]
    Configuration(String),
}
