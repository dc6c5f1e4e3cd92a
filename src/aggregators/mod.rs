//! Sentiment aggregation over a batch of validated posts.
//!
//! Each aggregator is a pure function of its input slice and configuration:
//! none holds state between calls and none writes to the posts, so they can
//! run in any order or concurrently over one shared batch. [`Report`] runs
//! them all and assembles the dashboard payload.

pub mod distribution;
pub mod engagement;
pub mod overview;
pub mod regions;
pub mod report;
pub mod terms;
pub mod timeline;
pub mod types;
pub mod utility;

pub use distribution::score_summary;
pub use engagement::{daily, hourly};
pub use overview::summarize;
pub use regions::regions;
pub use terms::{hashtags, terms};
pub use timeline::timeline;
pub use types::{
    EngagementEntry, HistogramBin, HourlyEntry, OverviewResult, RegionEntry, Report,
    ScoreDistribution, TermEntry, TimelineEntry,
};

#[cfg(test)]
pub(crate) mod testing {
    use crate::model::{Post, Sentiment, parse_timestamp};

    pub fn post_at(id: &str, timestamp: &str, sentiment: Sentiment) -> Post {
        let ts = parse_timestamp(timestamp).expect("test timestamp");
        Post::new(id, ts, sentiment)
    }

    /// 6 positive, 3 negative, 1 neutral; one day, all in "CA".
    pub fn scenario_ten_posts() -> Vec<Post> {
        use Sentiment::*;
        [Positive, Positive, Positive, Negative, Negative, Positive, Positive, Positive, Negative, Neutral]
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                post_at(&i.to_string(), &format!("2023-05-09T{:02}:15:00", 8 + i), s)
                    .with_location("CA")
                    .with_score(match s {
                        Positive => 0.6,
                        Negative => -0.6,
                        Neutral => 0.0,
                    })
            })
            .collect()
    }
}
