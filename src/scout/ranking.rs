//! Filtering and ranking of the candidate pool
//!
//! Candidates are filtered by stars and recency first, then scored against the
//! surviving population only:
//!
//! ```text
//! score = 0.7 * normalized_stars + 0.3 * normalized_time
//! ```
//!
//! Both terms are min-max normalized to [0, 1]. When every survivor shares
//! the same value the term is 1 for all of them. Sorting is stable, so equal
//! scores keep the provider's order (most recently updated first).

use chrono::{DateTime, TimeDelta, Utc};

use super::models::{CandidateRepository, SearchRequest};
use super::progress::{ProgressEvent, ProgressReporter};

/// Weight of the star term in the composite score
pub const STAR_WEIGHT: f64 = 0.7;

/// Weight of the recency term in the composite score
pub const RECENCY_WEIGHT: f64 = 0.3;

/// A candidate paired with its composite score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub repository: CandidateRepository,
    pub score: f64,
}

/// Keeps candidates with at least `min_stars` stars
pub fn filter_by_min_stars(
    candidates: Vec<CandidateRepository>,
    min_stars: u64,
) -> Vec<CandidateRepository> {
    if min_stars == 0 {
        return candidates;
    }

    candidates
        .into_iter()
        .filter(|repo| repo.stars >= min_stars)
        .collect()
}

/// Oldest `updated_at` still inside a `max_days` window ending at `now`
///
/// Windows reaching past the earliest representable date saturate to it.
pub fn recency_cutoff(now: DateTime<Utc>, max_days: u32) -> DateTime<Utc> {
    TimeDelta::try_days(i64::from(max_days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Keeps candidates updated within `max_days` days of `now`
pub fn filter_by_recency(
    candidates: Vec<CandidateRepository>,
    max_days: u32,
    now: DateTime<Utc>,
) -> Vec<CandidateRepository> {
    let cutoff = recency_cutoff(now, max_days);

    candidates
        .into_iter()
        .filter(|repo| repo.updated_at >= cutoff)
        .collect()
}

fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        1.0
    }
}

/// Computes composite scores over the given population
///
/// The output keeps the input order; an empty input yields an empty output.
pub fn score_candidates(candidates: Vec<CandidateRepository>) -> Vec<ScoredCandidate> {
    let Some(first) = candidates.first() else {
        return Vec::new();
    };

    let first_stars = first.stars;
    let first_time = first.updated_at.timestamp_millis();
    let (min_stars, max_stars, min_time, max_time) = candidates.iter().fold(
        (first_stars, first_stars, first_time, first_time),
        |(min_s, max_s, min_t, max_t), repo| {
            let time = repo.updated_at.timestamp_millis();
            (
                min_s.min(repo.stars),
                max_s.max(repo.stars),
                min_t.min(time),
                max_t.max(time),
            )
        },
    );

    candidates
        .into_iter()
        .map(|repository| {
            let normalized_stars = normalize(
                repository.stars as f64,
                min_stars as f64,
                max_stars as f64,
            );
            let normalized_time = normalize(
                repository.updated_at.timestamp_millis() as f64,
                min_time as f64,
                max_time as f64,
            );

            ScoredCandidate {
                score: STAR_WEIGHT * normalized_stars + RECENCY_WEIGHT * normalized_time,
                repository,
            }
        })
        .collect()
}

/// Scores and sorts candidates by descending score
pub fn rank_candidates(candidates: Vec<CandidateRepository>) -> Vec<ScoredCandidate> {
    let mut scored = score_candidates(candidates);
    // sort_by is stable, which makes provider order the tie-break
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Applies the request's filters, ranks the survivors and keeps the best
/// `max_results`
pub fn rank_and_select(
    pool: Vec<CandidateRepository>,
    request: &SearchRequest,
    now: DateTime<Utc>,
    progress: &dyn ProgressReporter,
) -> Vec<CandidateRepository> {
    let mut candidates = pool;

    if request.min_stars > 0 {
        let before = candidates.len();
        candidates = filter_by_min_stars(candidates, request.min_stars);
        progress.report(ProgressEvent::StarFilterApplied {
            min_stars: request.min_stars,
            before,
            after: candidates.len(),
        });
    }

    if let Some(max_days) = request.recency_window_days() {
        let before = candidates.len();
        candidates = filter_by_recency(candidates, max_days, now);
        progress.report(ProgressEvent::RecencyFilterApplied {
            max_days,
            before,
            after: candidates.len(),
        });
    }

    let selected: Vec<CandidateRepository> = rank_candidates(candidates)
        .into_iter()
        .take(request.max_results())
        .map(|scored| scored.repository)
        .collect();

    progress.report(ProgressEvent::RankingCompleted {
        selected: selected.len(),
    });

    selected
}
