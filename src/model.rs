//! Input data model: raw post records as supplied by ingestion, and the
//! validated [`Post`] every aggregator consumes.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Sentiment label attached to a post by an upstream classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// All labels in tie-break priority order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label is outside the three known sentiments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSentiment(pub String);

impl FromStr for Sentiment {
    type Err = UnknownSentiment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            _ => Err(UnknownSentiment(s.to_string())),
        }
    }
}

/// Direction of positive share across the input sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    #[serde(default, alias = "retweet_count")]
    pub retweets: u64,
    #[serde(default, alias = "favorite_count", alias = "likes")]
    pub favorites: u64,
    #[serde(default, alias = "reply_count")]
    pub replies: u64,
}

impl Engagement {
    pub fn new(retweets: u64, favorites: u64, replies: u64) -> Self {
        Self {
            retweets,
            favorites,
            replies,
        }
    }

    /// Sum of all three counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.retweets
            .saturating_add(self.favorites)
            .saturating_add(self.replies)
    }

    /// Adds `other` field by field, saturating at `u64::MAX`.
    pub fn accumulate(&mut self, other: &Engagement) {
        self.retweets = self.retweets.saturating_add(other.retweets);
        self.favorites = self.favorites.saturating_add(other.favorites);
        self.replies = self.replies.saturating_add(other.replies);
    }
}

/// A post exactly as received from ingestion, before validation.
///
/// Field aliases accept the naming used by the tweet collectors
/// (`created_at`, `user_location`, `sentiment_type`, `*_count`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(alias = "created_at")]
    pub timestamp: String,
    #[serde(alias = "sentiment_type")]
    pub sentiment_label: String,
    #[serde(default)]
    pub sentiment_score: f64,
    #[serde(default = "unknown_location", alias = "user_location")]
    pub location: String,
    #[serde(flatten)]
    pub engagement: Engagement,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

fn unknown_location() -> String {
    UNKNOWN_LOCATION.to_string()
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Int(i64),
        Str(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Int(n) => n.to_string(),
        Id::Str(s) => s,
    })
}

/// A validated post. Constructed by [`crate::validate`] or directly by callers
/// that already hold typed data.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub text: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
    pub location: String,
    pub engagement: Engagement,
    pub keywords: Option<Vec<String>>,
}

impl Post {
    /// Creates a post with no text, no engagement and an unknown location.
    pub fn new(id: impl Into<String>, timestamp: DateTime<Utc>, sentiment: Sentiment) -> Self {
        Post {
            id: id.into(),
            text: None,
            timestamp,
            sentiment,
            sentiment_score: 0.0,
            location: unknown_location(),
            engagement: Engagement::default(),
            keywords: None,
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.sentiment_score = score;
        self
    }

    pub fn with_engagement(mut self, engagement: Engagement) -> Self {
        self.engagement = engagement;
        self
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = Some(keywords.iter().map(|k| k.to_string()).collect());
        self
    }

    /// Calendar day of the post, in UTC.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Hour of day (0-23), in UTC.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    pub fn has_known_location(&self) -> bool {
        let loc = self.location.trim();
        !loc.is_empty() && loc != UNKNOWN_LOCATION
    }
}

/// Normalises a timestamp string to UTC.
///
/// Accepts RFC 3339 with an offset, naive ISO date-times (taken as UTC,
/// `T` or space separated, optional fraction) and bare `YYYY-MM-DD` dates.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
