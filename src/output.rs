//! Output formatting and persistence for reports.
//!
//! Supports pretty-printing, JSON (optionally gzip-compressed) and CSV export
//! of a single report section.

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::{debug, info};

use crate::aggregators::Report;

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Logs the overview section as pretty-printed JSON.
pub fn print_overview(report: &Report) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(&report.overview)?);
    Ok(())
}

/// Writes the report as JSON to `path`, gzip-compressed when `gzip` is set.
///
/// Returns the path actually written (`.gz` appended when compressing).
pub fn write_report(path: &str, report: &Report, gzip: bool) -> Result<String> {
    let body = serde_json::to_vec_pretty(report)?;

    let (bytes, target) = if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&body)?;
        (encoder.finish()?, format!("{path}.gz"))
    } else {
        (body, path.to_string())
    };

    std::fs::write(&target, &bytes).with_context(|| format!("writing report to {target}"))?;
    debug!(path = %target, bytes = bytes.len(), gzip, "Report written");
    Ok(target)
}

/// Writes `rows` to a CSV file at `path`, replacing any existing file.
pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    debug!(path, rows = rows.len(), "CSV section written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregators::Report;
    use crate::aggregators::testing::scenario_ten_posts;
    use crate::aggregators::types::TermEntry;
    use crate::config::{EngineConfig, TermConfig, VocabularyMode};
    use crate::lookup::RegionDirectory;
    use crate::model::Sentiment;
    use flate2::read::GzDecoder;
    use std::env;
    use std::fs;
    use std::io::Read;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn report() -> Report {
        let config = EngineConfig {
            terms: TermConfig {
                mode: VocabularyMode::Open,
                ..Default::default()
            },
            ..Default::default()
        };
        Report::build(
            &scenario_ten_posts(),
            None,
            &RegionDirectory::default(),
            &config,
        )
        .unwrap()
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&report());
    }

    #[test]
    fn test_print_overview_does_not_panic() {
        print_overview(&report()).unwrap();
    }

    #[test]
    fn test_write_report_plain() {
        let path = temp_path("sentiment_report_test_plain.json");
        let _ = fs::remove_file(&path);

        let written = write_report(&path, &report(), false).unwrap();
        assert_eq!(written, path);

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["overview"]["total_count"], 10);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_report_gzip() {
        let path = temp_path("sentiment_report_test_gzip.json");
        let written = write_report(&path, &report(), true).unwrap();
        assert!(written.ends_with(".json.gz"));

        let mut decoded = String::new();
        GzDecoder::new(fs::File::open(&written).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert!(decoded.contains("\"positive_pct\": 60"));

        fs::remove_file(&written).unwrap();
    }

    #[test]
    fn test_write_csv_rows() {
        let path = temp_path("sentiment_report_test_terms.csv");
        let rows = vec![
            TermEntry {
                term: "policy".into(),
                frequency: 4,
                dominant_sentiment: Sentiment::Positive,
            },
            TermEntry {
                term: "chaos".into(),
                frequency: 2,
                dominant_sentiment: Sentiment::Negative,
            },
        ];
        write_csv(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "term,frequency,dominant_sentiment");
        assert_eq!(lines[1], "policy,4,positive");
        assert_eq!(lines.len(), 3);

        fs::remove_file(&path).unwrap();
    }
}
