//! Batch validation of raw [`PostRecord`]s into typed [`Post`]s.

use tracing::{debug, warn};

use crate::config::ValidationMode;
use crate::error::{EngineError, EngineResult};
use crate::model::{Post, PostRecord, Sentiment, parse_timestamp};

impl PostRecord {
    /// Converts this record into a [`Post`], checking the label and timestamp.
    pub fn validate(&self) -> EngineResult<Post> {
        let sentiment: Sentiment =
            self.sentiment_label
                .parse()
                .map_err(|_| EngineError::InvalidSentimentLabel {
                    id: self.id.clone(),
                    label: self.sentiment_label.clone(),
                })?;

        let timestamp =
            parse_timestamp(&self.timestamp).ok_or_else(|| EngineError::MalformedTimestamp {
                id: self.id.clone(),
                value: self.timestamp.clone(),
            })?;

        Ok(Post {
            id: self.id.clone(),
            text: self.text.clone(),
            timestamp,
            sentiment,
            sentiment_score: self.sentiment_score,
            location: self.location.trim().to_string(),
            engagement: self.engagement,
            keywords: self.keywords.clone(),
        })
    }
}

/// Validates every record in input order.
///
/// In [`ValidationMode::Strict`] the first bad record fails the batch.
/// In [`ValidationMode::Lenient`] bad records are logged and skipped.
pub fn validate_batch(records: &[PostRecord], mode: ValidationMode) -> EngineResult<Vec<Post>> {
    let mut posts = Vec::with_capacity(records.len());
    let mut skipped = 0usize;

    for record in records {
        match record.validate() {
            Ok(post) => posts.push(post),
            Err(e) if mode == ValidationMode::Lenient => {
                warn!(post_id = %record.id, error = %e, "Skipping malformed post");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    debug!(valid = posts.len(), skipped, "Batch validated");
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Engagement, UNKNOWN_LOCATION};

    fn record(id: &str, timestamp: &str, label: &str) -> PostRecord {
        PostRecord {
            id: id.to_string(),
            text: None,
            timestamp: timestamp.to_string(),
            sentiment_label: label.to_string(),
            sentiment_score: 0.0,
            location: UNKNOWN_LOCATION.to_string(),
            engagement: Engagement::default(),
            keywords: None,
        }
    }

    fn mixed_batch() -> Vec<PostRecord> {
        vec![
            record("1", "2023-05-09T10:00:00", "positive"),
            record("2", "2023-05-09T11:00:00", "furious"),
            record("3", "not a date", "negative"),
            record("4", "2023-05-10", "neutral"),
        ]
    }

    #[test]
    fn test_validate_good_record() {
        let post = record("1", "2023-05-09T10:00:00", "Positive")
            .validate()
            .unwrap();
        assert_eq!(post.sentiment, Sentiment::Positive);
        assert_eq!(post.day().to_string(), "2023-05-09");
    }

    #[test]
    fn test_validate_bad_label() {
        let err = record("9", "2023-05-09", "furious").validate().unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidSentimentLabel { ref id, ref label } if id == "9" && label == "furious"
        ));
    }

    #[test]
    fn test_validate_bad_timestamp() {
        let err = record("9", "09/05/2023", "neutral").validate().unwrap_err();
        assert!(matches!(err, EngineError::MalformedTimestamp { .. }));
    }

    #[test]
    fn test_strict_rejects_whole_batch() {
        let err = validate_batch(&mixed_batch(), ValidationMode::Strict).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSentimentLabel { ref id, .. } if id == "2"));
    }

    #[test]
    fn test_lenient_skips_bad_records() {
        let posts = validate_batch(&mixed_batch(), ValidationMode::Lenient).unwrap();
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_lenient_all_bad_yields_empty() {
        let batch = vec![record("1", "nope", "positive")];
        let posts = validate_batch(&batch, ValidationMode::Lenient).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_location_is_trimmed() {
        let mut r = record("1", "2023-05-09", "neutral");
        r.location = " CA ".to_string();
        assert_eq!(r.validate().unwrap().location, "CA");
    }
}
