//! Result types produced by the aggregators.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::model::{Sentiment, Trend};

/// Single-record summary of the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewResult {
    /// Positive share, 0-100.
    pub overall_score: u8,
    pub total_count: usize,
    pub positive_pct: u8,
    pub negative_pct: u8,
    pub neutral_pct: u8,
    pub total_engagement: u64,
    /// Potential audience in millions; a rough estimate, not follower data.
    pub estimated_reach: f64,
    pub trend: Trend,
}

/// Sentiment split for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub date: NaiveDate,
    pub day_label: String,
    pub positive_pct: u8,
    pub negative_pct: u8,
    pub neutral_pct: u8,
    pub post_count: usize,
}

/// One ranked word-cloud (or hashtag) entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermEntry {
    pub term: String,
    pub frequency: usize,
    pub dominant_sentiment: Sentiment,
}

/// Positive share and volume for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionEntry {
    pub region_id: String,
    pub display_name: String,
    pub positive_pct: u8,
    pub mention_count: usize,
}

/// Engagement totals for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngagementEntry {
    pub date: NaiveDate,
    pub day_label: String,
    pub retweets: u64,
    pub favorites: u64,
    pub replies: u64,
}

/// Sentiment split and volume for one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyEntry {
    pub hour: u32,
    pub hour_label: String,
    pub positive_pct: u8,
    pub negative_pct: u8,
    pub volume: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Summary statistics of `sentiment_score` across the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreDistribution {
    pub mean: f64,
    pub median: f64,
    pub stddev: f64,
    pub histogram: Vec<HistogramBin>,
}

/// Complete dashboard payload for one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub overview: OverviewResult,
    pub timeline: Vec<TimelineEntry>,
    pub wordcloud: Vec<TermEntry>,
    pub hashtags: Vec<TermEntry>,
    pub regions: Vec<RegionEntry>,
    pub engagement: Vec<EngagementEntry>,
    pub hourly: Vec<HourlyEntry>,
    pub distribution: ScoreDistribution,
}
