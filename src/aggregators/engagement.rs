//! Engagement and activity breakdowns over time.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::aggregators::types::{EngagementEntry, HourlyEntry};
use crate::aggregators::utility::{day_label, hour_label};
use crate::model::{Engagement, Post};
use crate::stats::SentimentCounts;

/// Sums retweets, favorites and replies per UTC day, ascending by date.
pub fn daily(posts: &[Post]) -> Vec<EngagementEntry> {
    let mut by_day: BTreeMap<NaiveDate, Engagement> = BTreeMap::new();

    for p in posts {
        by_day.entry(p.day()).or_default().accumulate(&p.engagement);
    }

    by_day
        .into_iter()
        .map(|(date, e)| EngagementEntry {
            date,
            day_label: day_label(date),
            retweets: e.retweets,
            favorites: e.favorites,
            replies: e.replies,
        })
        .collect()
}

/// Positive/negative split and volume per UTC hour of day. Hours with no
/// posts are omitted.
pub fn hourly(posts: &[Post]) -> Vec<HourlyEntry> {
    let mut by_hour: BTreeMap<u32, SentimentCounts> = BTreeMap::new();

    for p in posts {
        by_hour.entry(p.hour()).or_default().add(p.sentiment);
    }

    let entries: Vec<_> = by_hour
        .into_iter()
        .map(|(hour, counts)| HourlyEntry {
            hour,
            hour_label: hour_label(hour),
            positive_pct: counts.positive_pct(),
            negative_pct: counts.negative_pct(),
            volume: counts.total(),
        })
        .collect();

    debug!(hours = entries.len(), "Hourly pattern computed");
    entries
}
