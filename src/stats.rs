use serde::Serialize;

use crate::model::{Post, Sentiment};

/// Per-label post counts for any group of posts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn from_posts<'a, I>(posts: I) -> Self
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let mut s = SentimentCounts::default();
        for p in posts {
            s.add(p.sentiment);
        }
        s
    }

    pub fn add(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Integer percentage in `[0, 100]`, rounded half up.
    ///
    /// Returns 0 for an empty group rather than dividing.
    pub fn pct(part: usize, total: usize) -> u8 {
        if total == 0 {
            return 0;
        }
        let part = part.min(total) as u128;
        let total = total as u128;
        ((200 * part + total) / (2 * total)) as u8
    }

    pub fn positive_pct(&self) -> u8 {
        Self::pct(self.positive, self.total())
    }

    pub fn negative_pct(&self) -> u8 {
        Self::pct(self.negative, self.total())
    }

    pub fn neutral_pct(&self) -> u8 {
        Self::pct(self.neutral, self.total())
    }

    /// Positive share as a fraction, `None` for an empty group.
    pub fn positive_fraction(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            n => Some(self.positive as f64 / n as f64),
        }
    }

    /// The most frequent label; ties go to the earlier label in [`Sentiment::ALL`].
    pub fn dominant(&self) -> Sentiment {
        let mut best = Sentiment::ALL[0];
        for s in Sentiment::ALL {
            if self.get(s) > self.get(best) {
                best = s;
            }
        }
        best
    }
}

/// Rounds a non-negative value to one decimal place, half up.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
