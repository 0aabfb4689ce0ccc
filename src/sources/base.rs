use std::time::Duration;

use anyhow::Context;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::SourceError;
use crate::config::AppConfig;
use crate::models::Event;
use crate::region::RegionMatcher;

const USER_AGENT: &str = "HackathonFinder/0.1 (+https://github.com/hackathon-finder)";

/// Where a source reads its payload from.
#[derive(Clone)]
pub enum Transport {
    /// Listings shipped with each source; no network traffic.
    Bundled,
    Live(Client),
}

pub enum Auth<'a> {
    None,
    Bearer(&'a str),
    Header(&'static str, &'a str),
}

impl<'a> Auth<'a> {
    pub fn bearer(token: Option<&'a str>) -> Self {
        match token {
            Some(token) => Auth::Bearer(token),
            None => Auth::None,
        }
    }
}

impl Transport {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        if !config.live {
            return Ok(Transport::Bundled);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .user_agent(USER_AGENT)
            .build()
            .context("unable to build http client")?;
        Ok(Transport::Live(client))
    }

    pub fn load(
        &self,
        url: &str,
        bundled: &'static str,
        auth: Auth<'_>,
    ) -> Result<String, SourceError> {
        match self {
            Transport::Bundled => Ok(bundled.to_string()),
            Transport::Live(client) => fetch_json(client, url, auth),
        }
    }
}

pub fn fetch_json(client: &Client, url: &str, auth: Auth<'_>) -> Result<String, SourceError> {
    let mut request = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json");
    request = match auth {
        Auth::None => request,
        Auth::Bearer(token) => request.bearer_auth(token),
        Auth::Header(name, value) => request.header(name, value),
    };

    let response = request
        .send()
        .map_err(|err| SourceError::Http(format!("request failed for {url}: {err}")))?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    response.text().map_err(|err| {
        SourceError::Http(format!("unable to read response body for {url}: {err}"))
    })
}

/// Listing shape shared by every feed; all fields are optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListing {
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub is_online: Option<bool>,
    pub is_regional: Option<bool>,
    /// Older feeds still send the flag under this name.
    pub is_california: Option<bool>,
    pub prize: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl RawListing {
    pub fn regional_flag(&self) -> Option<bool> {
        self.is_regional.or(self.is_california)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListingPage {
    Bare(Vec<Value>),
    Wrapped {
        #[serde(alias = "events", alias = "hackathons")]
        data: Vec<Value>,
    },
}

/// Splits a page into its items without looking inside them, so one
/// malformed item cannot take the rest of the page down with it.
pub fn parse_listings(body: &str) -> Result<Vec<Value>, SourceError> {
    let page: ListingPage =
        serde_json::from_str(body).map_err(|err| SourceError::Parse(err.to_string()))?;
    Ok(match page {
        ListingPage::Bare(items) => items,
        ListingPage::Wrapped { data } => data,
    })
}

/// How a source tells us an event sits in the priority region.
#[derive(Debug, Clone, Copy)]
pub enum RegionalPolicy<'a> {
    /// The feed has no flag; match the location text.
    FromLocation(&'a RegionMatcher),
    /// The feed carries an explicit flag; absent means false.
    FromFlag,
}

/// Maps raw listings onto canonical events, dropping the ones that do not
/// decode or fail validation.
pub fn build_events(
    source_name: &str,
    listings: Vec<Value>,
    policy: RegionalPolicy<'_>,
) -> Vec<Event> {
    let mut events = Vec::with_capacity(listings.len());
    for item in listings {
        let raw = match serde_json::from_value::<RawListing>(item) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(source = source_name, "dropping malformed listing: {err}");
                continue;
            }
        };
        let is_online = raw.is_online.unwrap_or(false);
        let is_regional_flag = raw.regional_flag();
        let location = raw
            .location
            .map(|l| clean_text(&l))
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| {
                if is_online {
                    "Online".to_string()
                } else {
                    String::new()
                }
            });
        let is_regional_priority = match policy {
            RegionalPolicy::FromLocation(matcher) => matcher.matches(&location),
            RegionalPolicy::FromFlag => is_regional_flag.unwrap_or(false),
        };

        let event = Event {
            title: raw.title.map(|t| clean_text(&t)).unwrap_or_default(),
            start_date: raw
                .start_date
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            end_date: raw
                .end_date
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            location,
            url: raw.url.map(|u| u.trim().to_string()).unwrap_or_default(),
            source_name: source_name.to_string(),
            is_online,
            is_regional_priority,
            prize: raw.prize.map(|p| clean_text(&p)).filter(|p| !p.is_empty()),
            tags: raw.tags.unwrap_or_default(),
        };

        match event.validate() {
            Ok(event) => events.push(event),
            Err(err) => warn!(source = source_name, "dropping listing: {err}"),
        }
    }
    debug!(source = source_name, count = events.len(), "mapped listings");
    events
}

pub fn clean_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
