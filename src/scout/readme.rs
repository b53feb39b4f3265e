//! README retrieval
//!
//! README lookups are best-effort enrichment: a missing README and every other
//! failure both come back as `None`, logged but never propagated.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::providers::{ProviderError, ReadmePayload, RepositoryProvider};

/// Splits an `owner/name` identifier into its two parts
///
/// Surrounding whitespace and slashes are ignored. Anything that does not
/// yield exactly two non-empty components is rejected.
pub fn parse_repository_identifier(full_name: &str) -> Option<(&str, &str)> {
    let mut parts = full_name.trim().trim_matches('/').split('/');
    let owner = parts.next()?.trim();
    let repo = parts.next()?.trim();

    if parts.next().is_some() || owner.is_empty() || repo.is_empty() {
        return None;
    }

    Some((owner, repo))
}

/// Decodes a README payload into UTF-8 text
///
/// GitHub wraps base64 content at 60 columns, so whitespace is removed before
/// decoding.
pub fn decode_readme(payload: &ReadmePayload) -> Result<String, ProviderError> {
    if !payload.encoding.eq_ignore_ascii_case("base64") {
        return Err(ProviderError::Malformed(format!(
            "unsupported README encoding '{}'",
            payload.encoding
        )));
    }

    let compact: String = payload
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ProviderError::Malformed(format!("invalid base64 README content: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| ProviderError::Malformed(format!("README is not valid UTF-8: {}", e)))
}

/// Fetches and decodes the README of `owner/name`
///
/// Returns `None` when the repository has no README, when the identifier is
/// invalid, or when the provider call or decoding fails.
pub async fn fetch_readme<P>(provider: &P, full_name: &str) -> Option<String>
where
    P: RepositoryProvider,
{
    let Some((owner, repo)) = parse_repository_identifier(full_name) else {
        tracing::warn!("Invalid repository identifier '{}', expected owner/name", full_name);
        return None;
    };

    let result = match provider.fetch_readme(owner, repo).await {
        Ok(payload) => decode_readme(&payload),
        Err(e) => Err(e),
    };

    match result {
        Ok(content) => Some(content),
        Err(e) if e.is_not_found() => {
            tracing::warn!("Repository {} has no README", full_name);
            None
        }
        Err(e) => {
            tracing::error!("Failed to fetch README for {}: {}", full_name, e);
            None
        }
    }
}
