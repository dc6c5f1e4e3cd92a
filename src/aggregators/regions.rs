use std::collections::HashMap;

use tracing::debug;

use crate::aggregators::types::RegionEntry;
use crate::config::{EngineConfig, RegionKeying};
use crate::lookup::RegionResolver;
use crate::model::Post;
use crate::stats::SentimentCounts;

/// Groups posts by location and ranks the regions by mention count.
///
/// The `"Unknown"` (or blank) location is always dropped, as is any group
/// with fewer than `config.min_region_mentions` posts. Ties rank by
/// `region_id` ascending, then by `display_name` ascending (derived codes
/// can collide in name keying).
pub fn regions(
    posts: &[Post],
    resolver: &dyn RegionResolver,
    config: &EngineConfig,
) -> Vec<RegionEntry> {
    let mut by_location: HashMap<&str, SentimentCounts> = HashMap::new();

    for p in posts.iter().filter(|p| p.has_known_location()) {
        by_location
            .entry(p.location.trim())
            .or_default()
            .add(p.sentiment);
    }

    let mut entries: Vec<_> = by_location
        .into_iter()
        .filter(|(_, counts)| counts.total() >= config.min_region_mentions)
        .map(|(location, counts)| {
            let (region_id, display_name) = identify(location, resolver, config.region_keying);
            RegionEntry {
                region_id,
                display_name,
                positive_pct: counts.positive_pct(),
                mention_count: counts.total(),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.mention_count
            .cmp(&a.mention_count)
            .then_with(|| a.region_id.cmp(&b.region_id))
            .then_with(|| a.display_name.cmp(&b.display_name))
    });

    debug!(
        regions = entries.len(),
        min_mentions = config.min_region_mentions,
        "Regions computed"
    );
    entries
}

/// Returns `(region_id, display_name)` for a location.
fn identify(
    location: &str,
    resolver: &dyn RegionResolver,
    keying: RegionKeying,
) -> (String, String) {
    match keying {
        RegionKeying::Code => {
            let name = resolver.display_name(location).unwrap_or(location);
            (location.to_string(), name.to_string())
        }
        RegionKeying::Name => {
            let code = resolver
                .code_for(location)
                .map(str::to_string)
                .unwrap_or_else(|| derive_code(location));
            (code, location.to_string())
        }
    }
}

/// Fallback short code: the first three characters, upper-cased.
pub fn derive_code(name: &str) -> String {
    name.chars().take(3).flat_map(char::to_uppercase).collect()
}
