use chrono::Utc;
use tracing::info;

use crate::aggregators::types::Report;
use crate::aggregators::{distribution, engagement, overview, regions, terms, timeline};
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::lookup::{RegionResolver, Vocabulary};
use crate::model::{Post, PostRecord};
use crate::validate::validate_batch;

pub const SCHEMA_VERSION: u8 = 1;

impl Report {
    /// Runs every aggregator over one validated batch.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::EngineError::EmptyInput`] for an empty batch, and
    /// with a config error in fixed vocabulary mode when `vocabulary` is `None`.
    #[tracing::instrument(skip_all, fields(posts = posts.len()))]
    pub fn build(
        posts: &[Post],
        vocabulary: Option<&Vocabulary>,
        resolver: &dyn RegionResolver,
        config: &EngineConfig,
    ) -> EngineResult<Report> {
        let overview = overview::summarize(posts, config)?;

        let report = Report {
            schema_version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            timeline: timeline::timeline(posts),
            wordcloud: terms::terms(posts, vocabulary, &config.terms)?,
            hashtags: terms::hashtags(posts, config.top_n_hashtags),
            regions: regions::regions(posts, resolver, config),
            engagement: engagement::daily(posts),
            hourly: engagement::hourly(posts),
            distribution: distribution::score_summary(posts, config.histogram_bins)?,
            overview,
        };

        info!(
            total = report.overview.total_count,
            positive_pct = report.overview.positive_pct,
            days = report.timeline.len(),
            terms = report.wordcloud.len(),
            regions = report.regions.len(),
            "Report built"
        );
        Ok(report)
    }

    /// Validates raw records under `config.validation`, then builds the report.
    pub fn from_records(
        records: &[PostRecord],
        vocabulary: Option<&Vocabulary>,
        resolver: &dyn RegionResolver,
        config: &EngineConfig,
    ) -> EngineResult<Report> {
        let posts = validate_batch(records, config.validation)?;
        Self::build(&posts, vocabulary, resolver, config)
    }
}
