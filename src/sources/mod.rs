pub mod base;
pub mod dev_events;
pub mod devpost;
pub mod luma;
pub mod mlh;

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::models::Event;
use crate::region::RegionMatcher;

use base::Transport;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("http error: {0}")]
    Http(String),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("parse error: {0}")]
    Parse(String),
}

/// One external listing feed.
///
/// `fetch` may fail freely; [`collect_all`] turns any failure into an empty
/// contribution so one broken source never sinks the run.
pub trait EventSource: Send + Sync {
    fn source_id(&self) -> &'static str;
    fn source_name(&self) -> &'static str;
    fn source_url(&self) -> &'static str;
    fn fetch(&self) -> anyhow::Result<Vec<Event>>;
}

/// Display details of a source for the listing page.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Sources in the order their records are concatenated.
pub fn active_sources(config: &AppConfig) -> anyhow::Result<Vec<Box<dyn EventSource>>> {
    let transport = Transport::from_config(config)?;
    let keys = &config.keys;

    let sources: Vec<Box<dyn EventSource>> = vec![
        Box::new(devpost::Devpost::new(
            transport.clone(),
            keys.devpost().map(str::to_string),
            RegionMatcher::new(&config.region),
        )),
        Box::new(mlh::Mlh::new(transport.clone(), keys.mlh().map(str::to_string))),
        Box::new(luma::Luma::new(transport.clone(), keys.luma().map(str::to_string))),
        Box::new(dev_events::DevEvents::new(
            transport,
            keys.dev_events().map(str::to_string),
        )),
    ];
    Ok(sources)
}

pub fn list_sources(sources: &[Box<dyn EventSource>]) -> Vec<SourceInfo> {
    sources
        .iter()
        .map(|source| SourceInfo {
            id: source.source_id().to_string(),
            name: source.source_name().to_string(),
            url: source.source_url().to_string(),
        })
        .collect()
}

/// Runs a single source, absorbing errors and panics into an empty result.
pub fn fetch_or_empty(source: &dyn EventSource) -> Vec<Event> {
    info!(
        source = source.source_id(),
        "fetching hackathons from {}",
        source.source_name()
    );
    match panic::catch_unwind(AssertUnwindSafe(|| source.fetch())) {
        Ok(Ok(events)) => {
            info!(
                source = source.source_id(),
                count = events.len(),
                "fetch finished"
            );
            events
        }
        Ok(Err(err)) => {
            error!(
                source = source.source_id(),
                "error fetching {} hackathons: {err:#}",
                source.source_name()
            );
            Vec::new()
        }
        Err(_) => {
            error!(source = source.source_id(), "{} fetch panicked", source.source_name());
            Vec::new()
        }
    }
}

/// Invokes every source once and concatenates the results in source order.
pub fn collect_all(sources: &[Box<dyn EventSource>]) -> Vec<Event> {
    let mut events = Vec::new();
    for source in sources {
        let mut fetched = fetch_or_empty(source.as_ref());
        events.append(&mut fetched);
    }
    events
}
