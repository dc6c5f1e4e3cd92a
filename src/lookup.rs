//! Read-only lookup tables injected into the aggregators.
//!
//! [`RegionDirectory`] maps region codes to display names (and back).
//! [`RegionResolver`] is the trait the region aggregator resolves through.
//! [`Vocabulary`] maps canonical terms to their baseline sentiment.

use std::collections::{BTreeMap, HashMap};

use crate::error::EngineResult;
use crate::model::Sentiment;

/// Resolves region codes and names for the region aggregator.
pub trait RegionResolver: Send + Sync {
    /// Human-readable name for a region code, if known.
    fn display_name(&self, code: &str) -> Option<&str>;

    /// Region code for a human-readable name, if known.
    fn code_for(&self, name: &str) -> Option<&str>;
}

/// Maps region codes to display names.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "CA": "California",
///   "TX": "Texas"
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegionDirectory {
    names: HashMap<String, String>,
    codes: HashMap<String, String>,
}

impl RegionDirectory {
    /// Loads the directory from a JSON file at `path`.
    pub fn load(path: &str) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let entries: HashMap<String, String> = serde_json::from_str(&content)?;
        Ok(Self::from_pairs(entries))
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut dir = RegionDirectory::default();
        for (code, name) in pairs {
            let (code, name) = (code.into(), name.into());
            dir.codes.insert(name.clone(), code.clone());
            dir.names.insert(code, name);
        }
        dir
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl RegionResolver for RegionDirectory {
    fn display_name(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    fn code_for(&self, name: &str) -> Option<&str> {
        self.codes.get(name).map(String::as_str)
    }
}

/// Lower-cases a token and drops every character that is not alphanumeric.
pub fn normalize_term(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Canonical terms and their baseline sentiment, matched case-insensitively.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "Violence": "negative",
///   "Justice": "positive"
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    // normalized form -> (canonical spelling, baseline)
    terms: BTreeMap<String, (String, Sentiment)>,
}

impl Vocabulary {
    /// Loads the vocabulary from a JSON file at `path`.
    pub fn load(path: &str) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let entries: BTreeMap<String, Sentiment> = serde_json::from_str(&content)?;
        Ok(Self::from_pairs(entries))
    }

    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Sentiment)>,
        K: Into<String>,
    {
        let terms = pairs
            .into_iter()
            .map(|(term, sentiment)| {
                let term = term.into();
                (normalize_term(&term), (term, sentiment))
            })
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Vocabulary { terms }
    }

    /// Looks up a normalized token, returning its canonical spelling and baseline.
    pub fn get(&self, normalized: &str) -> Option<(&str, Sentiment)> {
        self.terms
            .get(normalized)
            .map(|(term, sentiment)| (term.as_str(), *sentiment))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
