use tracing::debug;

use crate::aggregators::types::OverviewResult;
use crate::config::{EngineConfig, TrendSplit};
use crate::error::{EngineError, EngineResult};
use crate::model::{Post, Trend};
use crate::stats::{SentimentCounts, round1};

/// Trend reported when one side of the split has no posts.
pub const FALLBACK_TREND: Trend = Trend::Down;

/// Reduces the batch to a single [`OverviewResult`].
///
/// # Errors
///
/// Returns [`EngineError::EmptyInput`] when `posts` is empty.
pub fn summarize(posts: &[Post], config: &EngineConfig) -> EngineResult<OverviewResult> {
    if posts.is_empty() {
        return Err(EngineError::EmptyInput);
    }

    let counts = SentimentCounts::from_posts(posts);
    let total = counts.total();

    let total_engagement = posts
        .iter()
        .fold(0u64, |acc, p| acc.saturating_add(p.engagement.total()));
    let estimated_reach = round1(total as f64 * config.reach_per_post() / 1_000_000.0);
    let trend = trend(posts, config.trend_split);

    debug!(total, total_engagement, ?trend, "Overview computed");

    Ok(OverviewResult {
        overall_score: counts.positive_pct(),
        total_count: total,
        positive_pct: counts.positive_pct(),
        negative_pct: counts.negative_pct(),
        neutral_pct: counts.neutral_pct(),
        total_engagement,
        estimated_reach,
        trend,
    })
}

/// Compares the positive share of the earlier part of the batch with the later part.
pub fn trend(posts: &[Post], split: TrendSplit) -> Trend {
    let (before, after) = match split {
        TrendSplit::Midpoint => {
            let (first, second) = posts.split_at(posts.len() / 2);
            (
                SentimentCounts::from_posts(first),
                SentimentCounts::from_posts(second),
            )
        }
        TrendSplit::PivotDate(pivot) => (
            SentimentCounts::from_posts(posts.iter().filter(|p| p.day() < pivot)),
            SentimentCounts::from_posts(posts.iter().filter(|p| p.day() >= pivot)),
        ),
    };

    match (before.positive_fraction(), after.positive_fraction()) {
        (Some(b), Some(a)) if a > b => Trend::Up,
        (Some(_), Some(_)) => Trend::Down,
        _ => FALLBACK_TREND,
    }
}
