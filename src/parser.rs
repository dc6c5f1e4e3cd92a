//! Loaders for post batches stored as CSV, JSON or JSON Lines.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::model::{Engagement, PostRecord, UNKNOWN_LOCATION};

/// Keywords in CSV input are packed into one column, separated by this.
pub const KEYWORD_SEPARATOR: char = ';';

/// One flat CSV row. Numeric columns may be left empty.
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    text: Option<String>,
    #[serde(alias = "created_at")]
    timestamp: String,
    #[serde(alias = "sentiment_type")]
    sentiment_label: String,
    #[serde(default)]
    sentiment_score: Option<f64>,
    #[serde(default, alias = "user_location")]
    location: Option<String>,
    #[serde(default, alias = "retweet_count")]
    retweets: Option<u64>,
    #[serde(default, alias = "favorite_count")]
    favorites: Option<u64>,
    #[serde(default, alias = "reply_count")]
    replies: Option<u64>,
    #[serde(default)]
    keywords: Option<String>,
}

impl From<CsvRow> for PostRecord {
    fn from(row: CsvRow) -> Self {
        let keywords = row
            .keywords
            .map(|k| {
                k.split(KEYWORD_SEPARATOR)
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|k| !k.is_empty());

        PostRecord {
            id: row.id,
            text: row.text.filter(|t| !t.is_empty()),
            timestamp: row.timestamp,
            sentiment_label: row.sentiment_label,
            sentiment_score: row.sentiment_score.unwrap_or(0.0),
            location: row
                .location
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            engagement: Engagement::new(
                row.retweets.unwrap_or(0),
                row.favorites.unwrap_or(0),
                row.replies.unwrap_or(0),
            ),
            keywords,
        }
    }
}

/// Parses CSV with a header row.
pub fn parse_csv<R: Read>(reader: R) -> EngineResult<Vec<PostRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in rdr.deserialize() {
        let row: CsvRow = result?;
        records.push(row.into());
    }

    Ok(records)
}

/// Parses a JSON array of post objects.
pub fn parse_json(bytes: &[u8]) -> EngineResult<Vec<PostRecord>> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Parses one JSON post object per line; blank lines are ignored.
pub fn parse_json_lines(content: &str) -> EngineResult<Vec<PostRecord>> {
    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<PostRecord>(l).map_err(EngineError::from))
        .collect()
}

/// Loads a batch from `path`, choosing the format by file extension
/// (`.csv`, `.jsonl`/`.ndjson`, anything else as a JSON array).
#[tracing::instrument(fields(path = %path))]
pub fn load_records(path: &str) -> EngineResult<Vec<PostRecord>> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let records = match ext.as_deref() {
        Some("csv") => parse_csv(std::fs::File::open(path)?)?,
        Some("jsonl") | Some("ndjson") => parse_json_lines(&std::fs::read_to_string(path)?)?,
        _ => parse_json(&std::fs::read(path)?)?,
    };

    debug!(records = records.len(), "Post records loaded");
    Ok(records)
}
