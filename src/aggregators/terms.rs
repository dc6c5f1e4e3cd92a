//! Term-frequency ("word cloud") and hashtag ranking.

use std::collections::HashMap;

use tracing::debug;

use crate::aggregators::types::TermEntry;
use crate::config::{TermConfig, VocabularyMode};
use crate::error::{EngineError, EngineResult};
use crate::lookup::{Vocabulary, normalize_term};
use crate::model::{Post, Sentiment};
use crate::stats::SentimentCounts;

/// Tokens of this many characters or fewer are dropped in open mode.
pub const MIN_OPEN_TOKEN_CHARS: usize = 3;

#[derive(Default)]
struct Tally {
    frequency: usize,
    votes: SentimentCounts,
}

/// Counts terms across all posts and ranks them by frequency.
///
/// Terms come from a post's `keywords` when present, otherwise from its text.
/// Fixed mode requires a vocabulary and reports each term's baseline
/// sentiment; open mode reports the majority label of the posts it appeared in.
pub fn terms(
    posts: &[Post],
    vocabulary: Option<&Vocabulary>,
    config: &TermConfig,
) -> EngineResult<Vec<TermEntry>> {
    let entries = match config.mode {
        VocabularyMode::Fixed => {
            let vocabulary = vocabulary.ok_or_else(|| {
                EngineError::Config("fixed vocabulary mode requires a vocabulary".into())
            })?;
            fixed_vocabulary(posts, vocabulary)
        }
        VocabularyMode::Open => open_vocabulary(posts),
    };

    let ranked = rank(
        entries,
        config.effective_min_frequency(),
        config.effective_top_n(),
    );
    debug!(mode = ?config.mode, terms = ranked.len(), "Terms computed");
    Ok(ranked)
}

fn fixed_vocabulary(posts: &[Post], vocabulary: &Vocabulary) -> Vec<TermEntry> {
    let mut counts: HashMap<&str, (usize, Sentiment)> = HashMap::new();

    for p in posts {
        let tokens: Vec<String> = match &p.keywords {
            Some(keywords) => keywords.iter().map(|k| normalize_term(k)).collect(),
            None => p
                .text
                .as_deref()
                .unwrap_or_default()
                .split_whitespace()
                .map(normalize_term)
                .collect(),
        };

        for token in tokens {
            if let Some((term, baseline)) = vocabulary.get(&token) {
                counts.entry(term).or_insert((0, baseline)).0 += 1;
            }
        }
    }

    counts
        .into_iter()
        .map(|(term, (frequency, baseline))| TermEntry {
            term: term.to_string(),
            frequency,
            dominant_sentiment: baseline,
        })
        .collect()
}

fn open_tokens(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| *c != '#' && *c != '@')
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|t| t.chars().count() > MIN_OPEN_TOKEN_CHARS)
}

fn open_vocabulary(posts: &[Post]) -> Vec<TermEntry> {
    let mut tallies: HashMap<String, Tally> = HashMap::new();

    for p in posts {
        let sources: Vec<&str> = match &p.keywords {
            Some(keywords) => keywords.iter().map(String::as_str).collect(),
            None => p.text.as_deref().into_iter().collect(),
        };

        for token in sources.into_iter().flat_map(open_tokens) {
            let tally = tallies.entry(token).or_default();
            tally.frequency += 1;
            tally.votes.add(p.sentiment);
        }
    }

    into_entries(tallies)
}

/// Ranks `#tag` tokens found in post text, with the majority label of the
/// posts each tag appeared in.
pub fn hashtags(posts: &[Post], top_n: usize) -> Vec<TermEntry> {
    let mut tallies: HashMap<String, Tally> = HashMap::new();

    for p in posts {
        let Some(text) = p.text.as_deref() else {
            continue;
        };

        for word in text.split_whitespace() {
            let Some(tag) = word.strip_prefix('#') else {
                continue;
            };
            let tag = tag.trim_end_matches(|c: char| !(c.is_alphanumeric() || c == '_'));
            if tag.is_empty() {
                continue;
            }

            let tally = tallies.entry(format!("#{}", tag.to_lowercase())).or_default();
            tally.frequency += 1;
            tally.votes.add(p.sentiment);
        }
    }

    let ranked = rank(into_entries(tallies), 1, Some(top_n));
    debug!(hashtags = ranked.len(), "Hashtags computed");
    ranked
}

fn into_entries(tallies: HashMap<String, Tally>) -> Vec<TermEntry> {
    tallies
        .into_iter()
        .map(|(term, tally)| TermEntry {
            term,
            frequency: tally.frequency,
            dominant_sentiment: tally.votes.dominant(),
        })
        .collect()
}

/// Drops entries under `min_frequency` (and all zero counts), sorts by
/// frequency descending then term ascending, and applies the cap.
fn rank(mut entries: Vec<TermEntry>, min_frequency: usize, top_n: Option<usize>) -> Vec<TermEntry> {
    entries.retain(|e| e.frequency > 0 && e.frequency >= min_frequency);
    entries.sort_by(|a, b| {
        b.frequency
            .cmp(&a.frequency)
            .then_with(|| a.term.cmp(&b.term))
    });
    if let Some(n) = top_n {
        entries.truncate(n);
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregators::testing::post_at;

    fn open(min_frequency: Option<usize>, top_n: Option<usize>) -> TermConfig {
        TermConfig {
            mode: VocabularyMode::Open,
            min_frequency,
            top_n,
        }
    }

    fn political_vocabulary() -> Vocabulary {
        Vocabulary::from_pairs([
            ("ImranKhan", Sentiment::Positive),
            ("Justice", Sentiment::Positive),
            ("Violence", Sentiment::Negative),
            ("Pakistan", Sentiment::Neutral),
            ("Military", Sentiment::Neutral),
        ])
    }

    #[test]
    fn test_fixed_mode_requires_vocabulary() {
        let err = terms(&[], None, &TermConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_fixed_mode_counts_text_and_excludes_zero() {
        let posts = vec![
            post_at("1", "2023-05-09", Sentiment::Negative)
                .with_text("violence unacceptable #9thMay #Violence #Pakistan"),
            post_at("2", "2023-05-09", Sentiment::Positive)
                .with_text("support Imran Khan #ImranKhan #9thMay #Pakistan"),
            post_at("3", "2023-05-09", Sentiment::Neutral).with_text("Justice, for all."),
        ];
        let entries = terms(&posts, Some(&political_vocabulary()), &TermConfig::default()).unwrap();

        let found: Vec<_> = entries.iter().map(|e| (e.term.as_str(), e.frequency)).collect();
        assert_eq!(
            found,
            vec![("Pakistan", 2), ("Violence", 2), ("ImranKhan", 1), ("Justice", 1)]
        );
        assert!(entries.iter().all(|e| e.term != "Military"));

        let violence = entries.iter().find(|e| e.term == "Violence").unwrap();
        assert_eq!(violence.dominant_sentiment, Sentiment::Negative);
        let justice = entries.iter().find(|e| e.term == "Justice").unwrap();
        assert_eq!(justice.dominant_sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_fixed_mode_prefers_keywords_over_text() {
        let posts = vec![
            post_at("1", "2023-05-09", Sentiment::Negative)
                .with_text("Tweet about violence #Pakistan")
                .with_keywords(&["justice", "court"]),
        ];
        let entries = terms(&posts, Some(&political_vocabulary()), &TermConfig::default()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].term, "Justice");
    }

    #[test]
    fn test_open_mode_majority_sentiment_and_filters() {
        let posts = vec![
            post_at("1", "2023-05-09", Sentiment::Positive).with_text("Great initiative for policy"),
            post_at("2", "2023-05-09", Sentiment::Positive).with_text("great progress on #Policy"),
            post_at("3", "2023-05-09", Sentiment::Negative).with_text("terrible policy idea"),
            post_at("4", "2023-05-09", Sentiment::Negative).with_text("the bad @policy"),
        ];
        let entries = terms(&posts, None, &open(None, None)).unwrap();

        // "policy" x4 (2 pos, 2 neg -> positive by priority), "great" x2.
        // "initiative", "progress", "terrible", "idea" are below the default minimum of 2;
        // "for", "on", "the", "bad" are too short.
        let found: Vec<_> = entries
            .iter()
            .map(|e| (e.term.as_str(), e.frequency, e.dominant_sentiment))
            .collect();
        assert_eq!(
            found,
            vec![
                ("policy", 4, Sentiment::Positive),
                ("great", 2, Sentiment::Positive),
            ]
        );
    }

    #[test]
    fn test_open_mode_counts_per_occurrence() {
        let posts = vec![
            post_at("1", "2023-05-09", Sentiment::Neutral).with_text("budget budget budget"),
            post_at("2", "2023-05-09", Sentiment::Negative).with_text("budget"),
        ];
        let entries = terms(&posts, None, &open(Some(1), None)).unwrap();

        assert_eq!(entries[0].term, "budget");
        assert_eq!(entries[0].frequency, 4);
        assert_eq!(entries[0].dominant_sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_ties_broken_lexicographically_and_capped() {
        let posts = vec![
            post_at("1", "2023-05-09", Sentiment::Neutral).with_text("zeta alpha mango"),
            post_at("2", "2023-05-09", Sentiment::Neutral).with_text("mango alpha zeta"),
        ];
        let entries = terms(&posts, None, &open(None, Some(2))).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.term.as_str()).collect();

        assert_eq!(names, vec!["alpha", "mango"]);
    }

    #[test]
    fn test_open_mode_is_deterministic() {
        let posts: Vec<_> = (0..40)
            .map(|i| {
                let s = Sentiment::ALL[i % 3];
                post_at(&i.to_string(), "2023-05-09", s)
                    .with_text(&format!("word{} shared common token{}", i % 7, i % 5))
            })
            .collect();

        let first = terms(&posts, None, &open(None, None)).unwrap();
        let second = terms(&posts, None, &open(None, None)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_open_cap_is_fifty() {
        let text: String = (0..60).map(|i| format!("term{i:02} ")).collect();
        let posts = vec![
            post_at("1", "2023-05-09", Sentiment::Neutral).with_text(&text),
            post_at("2", "2023-05-09", Sentiment::Neutral).with_text(&text),
        ];
        let entries = terms(&posts, None, &open(None, None)).unwrap();
        assert_eq!(entries.len(), 50);
        assert_eq!(entries[0].term, "term00");
    }

    #[test]
    fn test_hashtags() {
        let posts = vec![
            post_at("1", "2023-05-09", Sentiment::Negative)
                .with_text("chaos in streets #9thMay #Violence #Pakistan"),
            post_at("2", "2023-05-09", Sentiment::Positive)
                .with_text("standing with PTI #ImranKhan #9thMay #Pakistan."),
            post_at("3", "2023-05-09", Sentiment::Negative).with_text("#9thmay! # #"),
        ];
        let tags = hashtags(&posts, 3);
        let found: Vec<_> = tags
            .iter()
            .map(|t| (t.term.as_str(), t.frequency, t.dominant_sentiment))
            .collect();

        assert_eq!(
            found,
            vec![
                ("#9thmay", 3, Sentiment::Negative),
                ("#pakistan", 2, Sentiment::Positive),
                ("#imrankhan", 1, Sentiment::Positive),
            ]
        );
    }
}
