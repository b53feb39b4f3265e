//! Progress reporting for the search pipeline
//!
//! The pipeline emits [`ProgressEvent`]s instead of writing to the console, so
//! callers decide where progress goes. [`TracingProgress`] is the default and
//! logs each event through `tracing`.

use std::sync::Mutex;

use super::pool::StopReason;

/// A step of the search pipeline worth reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    SearchStarted {
        query: String,
        min_stars: u64,
        max_days_since_update: Option<u32>,
    },
    PageFetched {
        page: u32,
        items: usize,
        pool_size: usize,
    },
    PoolAcquired {
        pool_size: usize,
        pages: u32,
        stop_reason: StopReason,
    },
    StarFilterApplied {
        min_stars: u64,
        before: usize,
        after: usize,
    },
    RecencyFilterApplied {
        max_days: u32,
        before: usize,
        after: usize,
    },
    RankingCompleted {
        selected: usize,
    },
}

/// Receiver of pipeline progress events
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// Logs progress events through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::SearchStarted {
                query,
                min_stars,
                max_days_since_update,
            } => {
                tracing::info!("Searching repositories: {}", query);
                if min_stars > 0 {
                    tracing::info!("Minimum stars: {}", min_stars);
                }
                if let Some(days) = max_days_since_update {
                    tracing::info!("Maximum days since update: {}", days);
                }
            }
            ProgressEvent::PageFetched {
                page,
                items,
                pool_size,
            } => {
                tracing::info!("Page {} returned {} items, {} in total", page, items, pool_size);
            }
            ProgressEvent::PoolAcquired {
                pool_size,
                pages,
                stop_reason,
            } => {
                tracing::info!(
                    "Collected {} candidates across {} pages ({})",
                    pool_size,
                    pages,
                    stop_reason
                );
            }
            ProgressEvent::StarFilterApplied {
                min_stars,
                before,
                after,
            } => {
                tracing::info!("Filtered stars < {}: {} -> {}", min_stars, before, after);
            }
            ProgressEvent::RecencyFilterApplied {
                max_days,
                before,
                after,
            } => {
                if before > after {
                    tracing::info!(
                        "Filtered repositories not updated in {} days: {} -> {} ({} removed)",
                        max_days,
                        before,
                        after,
                        before - after
                    );
                }
            }
            ProgressEvent::RankingCompleted { selected } => {
                tracing::info!("Selected {} repositories", selected);
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Keeps every event in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the events recorded so far
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl ProgressReporter for RecordingProgress {
    fn report(&self, event: ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
