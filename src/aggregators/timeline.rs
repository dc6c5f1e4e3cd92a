use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::aggregators::types::TimelineEntry;
use crate::aggregators::utility::day_label;
use crate::model::Post;
use crate::stats::SentimentCounts;

/// Groups posts by UTC calendar day and emits one sentiment split per day,
/// ascending by date. Empty input yields an empty timeline.
pub fn timeline(posts: &[Post]) -> Vec<TimelineEntry> {
    let mut by_day: BTreeMap<NaiveDate, SentimentCounts> = BTreeMap::new();

    for p in posts {
        by_day.entry(p.day()).or_default().add(p.sentiment);
    }

    let entries: Vec<_> = by_day
        .into_iter()
        .map(|(date, counts)| TimelineEntry {
            date,
            day_label: day_label(date),
            positive_pct: counts.positive_pct(),
            negative_pct: counts.negative_pct(),
            neutral_pct: counts.neutral_pct(),
            post_count: counts.total(),
        })
        .collect();

    debug!(days = entries.len(), "Timeline computed");
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregators::testing::{post_at, scenario_ten_posts};
    use crate::model::Sentiment;

    #[test]
    fn test_timeline_empty() {
        assert!(timeline(&[]).is_empty());
    }

    #[test]
    fn test_timeline_single_day_scenario() {
        let entries = timeline(&scenario_ten_posts());

        assert_eq!(entries.len(), 1);
        let day = &entries[0];
        assert_eq!(day.positive_pct, 60);
        assert_eq!(day.negative_pct, 30);
        assert_eq!(day.neutral_pct, 10);
        assert_eq!(day.post_count, 10);
        assert_eq!(day.day_label, "May 09");
    }

    #[test]
    fn test_timeline_orders_by_date_not_label() {
        // "Apr 30" sorts after "May 01" only by date; by label it would come first.
        let posts = vec![
            post_at("1", "2023-05-01T09:00:00", Sentiment::Positive),
            post_at("2", "2023-04-30T09:00:00", Sentiment::Negative),
            post_at("3", "2022-12-31T09:00:00", Sentiment::Neutral),
        ];
        let entries = timeline(&posts);
        let dates: Vec<_> = entries.iter().map(|e| e.date.to_string()).collect();

        assert_eq!(dates, vec!["2022-12-31", "2023-04-30", "2023-05-01"]);
    }

    #[test]
    fn test_timeline_groups_and_preserves_total() {
        let posts = vec![
            post_at("1", "2023-05-09T00:00:00", Sentiment::Positive),
            post_at("2", "2023-05-09T23:59:59", Sentiment::Negative),
            post_at("3", "2023-05-10T00:00:00", Sentiment::Neutral),
            post_at("4", "2023-05-09T12:00:00", Sentiment::Positive),
        ];
        let entries = timeline(&posts);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries.iter().map(|e| e.post_count).sum::<usize>(), posts.len());
        assert_eq!(entries[0].positive_pct, 67);
        assert_eq!(entries[0].negative_pct, 33);
        assert_eq!(entries[1].neutral_pct, 100);
        assert!(entries.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_timeline_day_boundary_is_utc() {
        let posts = vec![
            // 2023-05-09T01:30+05:00 is still May 8 in UTC
            post_at("1", "2023-05-09T01:30:00+05:00", Sentiment::Positive),
            post_at("2", "2023-05-08T10:00:00", Sentiment::Positive),
        ];
        let entries = timeline(&posts);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date.to_string(), "2023-05-08");
    }
}
