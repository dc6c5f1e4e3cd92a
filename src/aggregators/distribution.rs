use tracing::debug;

use crate::aggregators::types::{HistogramBin, ScoreDistribution};
use crate::aggregators::utility::{mean, median, stddev};
use crate::error::{EngineError, EngineResult};
use crate::model::Post;

const SCORE_MIN: f64 = -1.0;
const SCORE_MAX: f64 = 1.0;

/// Mean, median, standard deviation and a fixed-width histogram of
/// `sentiment_score` over `[-1, 1]`. Scores outside the range are clamped
/// into the edge bins.
///
/// # Errors
///
/// Returns [`EngineError::EmptyInput`] for an empty batch.
pub fn score_summary(posts: &[Post], bins: usize) -> EngineResult<ScoreDistribution> {
    if posts.is_empty() {
        return Err(EngineError::EmptyInput);
    }
    let bins = bins.max(1);

    let scores: Vec<f64> = posts.iter().map(|p| p.sentiment_score).collect();
    let avg = mean(&scores);

    let width = (SCORE_MAX - SCORE_MIN) / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: SCORE_MIN + i as f64 * width,
            upper: SCORE_MIN + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for score in &scores {
        let clamped = score.clamp(SCORE_MIN, SCORE_MAX);
        let idx = (((clamped - SCORE_MIN) / width) as usize).min(bins - 1);
        histogram[idx].count += 1;
    }

    debug!(posts = scores.len(), bins, mean = avg, "Score distribution computed");

    Ok(ScoreDistribution {
        mean: avg,
        median: median(&scores),
        stddev: stddev(&scores, avg),
        histogram,
    })
}
