//! Engine configuration.
//!
//! Stored as a plain JSON object on disk; every field is optional:
//! ```json
//! {
//!   "min_region_mentions": 10,
//!   "audience": "regional",
//!   "terms": { "mode": "open", "top_n": 25 },
//!   "trend_split": { "pivot_date": "2023-05-09" },
//!   "validation": "lenient"
//! }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

pub const DEFAULT_MIN_REGION_MENTIONS: usize = 5;
pub const DEFAULT_OPEN_MIN_FREQUENCY: usize = 2;
pub const DEFAULT_OPEN_TOP_N: usize = 50;
pub const DEFAULT_TOP_N_HASHTAGS: usize = 10;
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Audience presets for the reach estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudiencePreset {
    /// Broad national audience, ~500 followers per author.
    #[default]
    General,
    /// Smaller regional audience, ~300 followers per author.
    Regional,
}

impl AudiencePreset {
    pub fn average_reach_per_post(&self) -> f64 {
        match self {
            AudiencePreset::General => 500.0,
            AudiencePreset::Regional => 300.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyMode {
    /// Count only the canonical terms of an injected vocabulary.
    #[default]
    Fixed,
    /// Count every token of length > 3 found in post text.
    Open,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermConfig {
    pub mode: VocabularyMode,
    /// Minimum total frequency kept; `None` uses the mode's default.
    pub min_frequency: Option<usize>,
    /// Result cap; `None` uses the mode's default.
    pub top_n: Option<usize>,
}

impl TermConfig {
    pub fn effective_min_frequency(&self) -> usize {
        self.min_frequency.unwrap_or(match self.mode {
            VocabularyMode::Fixed => 0,
            VocabularyMode::Open => DEFAULT_OPEN_MIN_FREQUENCY,
        })
    }

    pub fn effective_top_n(&self) -> Option<usize> {
        self.top_n.or(match self.mode {
            VocabularyMode::Fixed => None,
            VocabularyMode::Open => Some(DEFAULT_OPEN_TOP_N),
        })
    }
}

/// How the overview splits the sequence to infer a trend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSplit {
    /// First half vs second half by index.
    #[default]
    Midpoint,
    /// Posts before the pivot day vs posts on or after it.
    PivotDate(NaiveDate),
}

/// What to do with a record that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Reject the whole batch.
    #[default]
    Strict,
    /// Skip the record and keep going.
    Lenient,
}

/// Whether post locations carry region codes or region names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKeying {
    #[default]
    Code,
    Name,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub min_region_mentions: usize,
    pub audience: AudiencePreset,
    /// Overrides the audience preset when set.
    pub average_reach_per_post: Option<f64>,
    pub terms: TermConfig,
    pub top_n_hashtags: usize,
    pub histogram_bins: usize,
    pub trend_split: TrendSplit,
    pub validation: ValidationMode,
    pub region_keying: RegionKeying,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            min_region_mentions: DEFAULT_MIN_REGION_MENTIONS,
            audience: AudiencePreset::General,
            average_reach_per_post: None,
            terms: TermConfig::default(),
            top_n_hashtags: DEFAULT_TOP_N_HASHTAGS,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            trend_split: TrendSplit::Midpoint,
            validation: ValidationMode::Strict,
            region_keying: RegionKeying::Code,
        }
    }
}

impl EngineConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Preset for the smaller regional datasets: reach 300, 10-mention floor,
    /// regions keyed by name.
    pub fn regional() -> Self {
        EngineConfig {
            min_region_mentions: 10,
            audience: AudiencePreset::Regional,
            region_keying: RegionKeying::Name,
            ..Default::default()
        }
    }

    pub fn reach_per_post(&self) -> f64 {
        self.average_reach_per_post
            .unwrap_or_else(|| self.audience.average_reach_per_post())
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    fn check(&self) -> EngineResult<()> {
        if let Some(reach) = self.average_reach_per_post {
            if !reach.is_finite() || reach < 0.0 {
                return Err(EngineError::Config(format!(
                    "average_reach_per_post must be a non-negative number, got {reach}"
                )));
            }
        }
        if self.histogram_bins == 0 {
            return Err(EngineError::Config("histogram_bins must be at least 1".into()));
        }
        Ok(())
    }
}
