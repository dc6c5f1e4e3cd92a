//! CLI entry point for the sentiment report tool.
//!
//! Loads a batch of posts from disk, runs the aggregation engine and writes
//! the dashboard report, a single section as CSV, or a logged summary.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sentiment_report::aggregators::{self, Report};
use sentiment_report::config::{EngineConfig, ValidationMode, VocabularyMode};
use sentiment_report::lookup::{RegionDirectory, Vocabulary};
use sentiment_report::output::{print_overview, print_pretty, write_csv, write_report};
use sentiment_report::parser::load_records;
use sentiment_report::validate::validate_batch;
use sentiment_report::{EngineError, Post};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "sentiment_report")]
#[command(about = "Aggregate sentiment-labelled posts into dashboard analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct EngineArgs {
    /// Posts to aggregate (.csv, .json or .jsonl)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Engine configuration JSON
    #[arg(short, long)]
    config: Option<String>,

    /// Region directory JSON (code -> display name)
    #[arg(short, long)]
    regions: Option<String>,

    /// Term vocabulary JSON (term -> sentiment); without it the open vocabulary is used
    #[arg(short, long)]
    vocabulary: Option<String>,

    /// Skip malformed posts instead of rejecting the batch
    #[arg(long, default_value_t = false)]
    lenient: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full dashboard report as JSON
    Report {
        #[command(flatten)]
        engine: EngineArgs,

        /// Where to write the report
        #[arg(short, long, default_value = "report.json")]
        output: String,

        /// Gzip compress the report
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Export one report section as CSV
    Export {
        #[command(flatten)]
        engine: EngineArgs,

        #[arg(short, long, value_enum)]
        section: Section,

        /// CSV file to write
        #[arg(short, long)]
        output: String,
    },
    /// Log the overview of a batch
    Summary {
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Section {
    Timeline,
    Wordcloud,
    Hashtags,
    Regions,
    Engagement,
    Hourly,
}

struct Engine {
    config: EngineConfig,
    directory: RegionDirectory,
    vocabulary: Option<Vocabulary>,
    posts: Vec<Post>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/sentiment_report.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("sentiment_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            engine,
            output,
            gzip,
        } => {
            let e = load_engine(&engine)?;
            let report = Report::build(
                &e.posts,
                e.vocabulary.as_ref(),
                &e.directory,
                &e.config,
            )?;
            print_pretty(&report);
            print_overview(&report)?;
            let written = write_report(&output, &report, gzip)?;
            info!(path = %written, "Report written");
        }
        Commands::Export {
            engine,
            section,
            output,
        } => {
            let e = load_engine(&engine)?;
            export_section(&e, section, &output)?;
            info!(?section, path = %output, "Section exported");
        }
        Commands::Summary { engine } => {
            let e = load_engine(&engine)?;
            match aggregators::summarize(&e.posts, &e.config) {
                Ok(overview) => {
                    info!(
                        overall = overview.overall_score,
                        total = overview.total_count,
                        positive = overview.positive_pct,
                        negative = overview.negative_pct,
                        neutral = overview.neutral_pct,
                        engagement = overview.total_engagement,
                        reach_millions = overview.estimated_reach,
                        trend = ?overview.trend,
                        "Overview"
                    );
                }
                Err(EngineError::EmptyInput) => warn!("No valid posts in batch"),
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

/// Loads configuration, lookup tables and the validated batch.
#[tracing::instrument(skip_all, fields(input = %args.input))]
fn load_engine(args: &EngineArgs) -> Result<Engine> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path).with_context(|| format!("loading config {path}"))?,
        None => EngineConfig::default(),
    };
    if args.lenient {
        config.validation = ValidationMode::Lenient;
    }

    let directory = match &args.regions {
        Some(path) => {
            RegionDirectory::load(path).with_context(|| format!("loading regions {path}"))?
        }
        None => RegionDirectory::default(),
    };

    let vocabulary = match &args.vocabulary {
        Some(path) => {
            Some(Vocabulary::load(path).with_context(|| format!("loading vocabulary {path}"))?)
        }
        None => None,
    };
    if vocabulary.is_none() && config.terms.mode == VocabularyMode::Fixed {
        info!("No vocabulary supplied, using open vocabulary");
        config.terms.mode = VocabularyMode::Open;
    }

    let records = load_records(&args.input)
        .with_context(|| format!("loading posts from {}", args.input))?;
    let posts = match validate_batch(&records, config.validation) {
        Err(e) if e.is_record_error() => {
            return Err(anyhow::Error::new(e).context("malformed post, rerun with --lenient to skip it"));
        }
        result => result?,
    };

    info!(
        records = records.len(),
        posts = posts.len(),
        regions = directory.len(),
        terms = vocabulary.as_ref().map_or(0, Vocabulary::len),
        "Batch loaded"
    );

    Ok(Engine {
        config,
        directory,
        vocabulary,
        posts,
    })
}

fn export_section(e: &Engine, section: Section, output: &str) -> Result<()> {
    match section {
        Section::Timeline => write_csv(output, &aggregators::timeline(&e.posts)),
        Section::Wordcloud => write_csv(
            output,
            &aggregators::terms(&e.posts, e.vocabulary.as_ref(), &e.config.terms)?,
        ),
        Section::Hashtags => write_csv(
            output,
            &aggregators::hashtags(&e.posts, e.config.top_n_hashtags),
        ),
        Section::Regions => write_csv(
            output,
            &aggregators::regions(&e.posts, &e.directory, &e.config),
        ),
        Section::Engagement => write_csv(output, &aggregators::daily(&e.posts)),
        Section::Hourly => write_csv(output, &aggregators::hourly(&e.posts)),
    }
}
