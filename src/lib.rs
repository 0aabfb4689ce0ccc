pub mod classify;
pub mod config;
pub mod logging;
pub mod models;
pub mod region;
pub mod render;
pub mod snapshot;
pub mod sources;
pub mod utils;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use tracing::info;

use classify::{categorize, Categorized};
use config::AppConfig;
use region::RegionMatcher;
use render::{expired_events, render_archive, render_listing, RenderContext};
use snapshot::SnapshotWriter;
use sources::EventSource;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub collected: usize,
    pub regional: usize,
    pub online: usize,
    pub other: usize,
    pub archived: usize,
}

impl RunSummary {
    fn from_categorized(collected: usize, categorized: &Categorized, archived: usize) -> Self {
        Self {
            collected,
            regional: categorized.regional.len(),
            online: categorized.online.len(),
            other: categorized.other.len(),
            archived,
        }
    }
}

/// Fetch, classify, then write snapshot, listing and archive in that order.
///
/// Source failures only shrink the output. Any write failure aborts the run
/// and leaves the files not yet written untouched.
pub fn run_pipeline(
    config: &AppConfig,
    sources: &[Box<dyn EventSource>],
    today: NaiveDate,
) -> anyhow::Result<RunSummary> {
    info!("starting hackathon update");

    let events = sources::collect_all(sources);
    let collected = events.len();
    info!(count = collected, "collected hackathons from all sources");

    let categorized = categorize(events);
    info!(
        regional = categorized.regional.len(),
        online = categorized.online.len(),
        other = categorized.other.len(),
        "categorized hackathons"
    );

    SnapshotWriter::new(&config.data_file)
        .write(&categorized)
        .context("failed to save hackathon snapshot")?;

    let ctx = RenderContext {
        region_label: region_label(config),
        today,
        sources: sources::list_sources(sources),
    };
    utils::write_atomic(&config.readme_path, &render_listing(&categorized, &ctx))
        .context("failed to update listing document")?;
    info!(path = %config.readme_path.display(), "updated listing document");

    let archived = expired_events(&categorized, today).len();
    utils::write_atomic(&config.archive_path, &render_archive(&categorized, today))
        .context("failed to update archive document")?;
    info!(path = %config.archive_path.display(), archived, "updated archive document");

    let summary = RunSummary::from_categorized(collected, &categorized, archived);
    info!(?summary, "hackathon update completed");
    Ok(summary)
}

/// Runs the pipeline against the configured sources as of today.
pub fn run(config: &AppConfig) -> anyhow::Result<RunSummary> {
    let sources = sources::active_sources(config)?;
    run_pipeline(config, &sources, Local::now().date_naive())
}

fn region_label(config: &AppConfig) -> String {
    let matcher = RegionMatcher::new(&config.region);
    if matcher.label().is_empty() {
        "Regional".to_string()
    } else {
        matcher.label().to_string()
    }
}
