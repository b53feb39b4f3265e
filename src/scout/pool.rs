//! Candidate pool acquisition
//!
//! The ranking stage needs more material than the caller asked for, so the
//! acquirer widens the request to three times `max_results` and pages through
//! the provider until one of the stop conditions holds. Pages are fetched one
//! at a time since each stop decision depends on the previous page.

use strum::Display;

use super::error::ScoutError;
use super::models::CandidateRepository;
use super::progress::{ProgressEvent, ProgressReporter};
use super::providers::models::MAX_PER_PAGE;
use super::providers::{RepositoryProvider, SearchPageRequest};

/// Cumulative number of search results the provider will serve
pub const RESULT_WINDOW_LIMIT: usize = 1000;

/// How many candidates are pooled per requested result
pub const POOL_WIDENING_FACTOR: usize = 3;

/// Why pagination ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StopReason {
    /// The last page had no items
    #[strum(serialize = "empty page")]
    EmptyPage,
    /// The pool holds at least `target_pool` candidates
    #[strum(serialize = "target pool reached")]
    TargetReached,
    /// The last page was shorter than `per_page`, so the provider has no more
    #[strum(serialize = "short page")]
    ShortPage,
    /// The pool reached the provider's result window
    #[strum(serialize = "result window exhausted")]
    ResultWindowExhausted,
}

/// Pool size and page size derived from the requested result count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolPlan {
    pub target_pool: usize,
    pub per_page: usize,
}

impl PoolPlan {
    pub fn for_max_results(max_results: usize) -> Self {
        let target_pool = max_results
            .max(1)
            .saturating_mul(POOL_WIDENING_FACTOR)
            .min(RESULT_WINDOW_LIMIT);

        Self {
            target_pool,
            per_page: target_pool.min(MAX_PER_PAGE),
        }
    }

    pub fn is_empty_page(&self, page_len: usize) -> bool {
        page_len == 0
    }

    pub fn is_target_reached(&self, pool_len: usize) -> bool {
        pool_len >= self.target_pool
    }

    pub fn is_short_page(&self, page_len: usize) -> bool {
        page_len < self.per_page
    }

    pub fn is_window_exhausted(&self, pool_len: usize) -> bool {
        pool_len >= RESULT_WINDOW_LIMIT
    }

    /// Evaluates the stop conditions after a page has been appended
    ///
    /// An empty page is checked first since it is also a short page and is
    /// the more specific signal.
    pub fn stop_reason(&self, pool_len: usize, page_len: usize) -> Option<StopReason> {
        if self.is_empty_page(page_len) {
            Some(StopReason::EmptyPage)
        } else if self.is_target_reached(pool_len) {
            Some(StopReason::TargetReached)
        } else if self.is_short_page(page_len) {
            Some(StopReason::ShortPage)
        } else if self.is_window_exhausted(pool_len) {
            Some(StopReason::ResultWindowExhausted)
        } else {
            None
        }
    }
}

/// Result of a completed acquisition
#[derive(Debug, Clone)]
pub struct AcquiredPool {
    pub candidates: Vec<CandidateRepository>,
    pub pages: u32,
    pub stop_reason: StopReason,
}

/// Pages through the provider until the pool for `max_results` is filled
///
/// Any provider failure aborts the whole acquisition; no partial pool is
/// returned.
pub async fn acquire_pool<P>(
    provider: &P,
    query: &str,
    max_results: usize,
    progress: &dyn ProgressReporter,
) -> Result<AcquiredPool, ScoutError>
where
    P: RepositoryProvider,
{
    let plan = PoolPlan::for_max_results(max_results);
    let mut candidates: Vec<CandidateRepository> = Vec::with_capacity(plan.target_pool);
    let mut page: u32 = 1;

    let stop_reason = loop {
        let request = SearchPageRequest::recently_updated(query, plan.per_page, page);
        let items = provider
            .search_page(&request)
            .await
            .map_err(|source| {
                tracing::error!("Repository search failed on page {}: {}", page, source);
                ScoutError::Acquisition { page, source }
            })?;

        let page_len = items.len();
        candidates.extend(items);

        progress.report(ProgressEvent::PageFetched {
            page,
            items: page_len,
            pool_size: candidates.len(),
        });

        if let Some(reason) = plan.stop_reason(candidates.len(), page_len) {
            break reason;
        }

        page += 1;
    };

    // Keeps the provider's ordering; the tail beyond the target is discarded
    candidates.truncate(plan.target_pool);

    progress.report(ProgressEvent::PoolAcquired {
        pool_size: candidates.len(),
        pages: page,
        stop_reason,
    });

    Ok(AcquiredPool {
        candidates,
        pages: page,
        stop_reason,
    })
}
