use anyhow::Result;

use super::base::{self, Auth, RegionalPolicy, Transport};
use super::EventSource;
use crate::models::Event;

const URL: &str = "https://api.dev.events/hackathons/NA/US/CA";
const SOURCE_ID: &str = "dev_events";
const SOURCE_NAME: &str = "dev.events";
const LISTING_URL: &str = "https://dev.events/hackathons/NA/US/CA";

const BUNDLED: &str = r#"[
    {
        "title": "Hack Cupertino 2025",
        "start_date": "2025-04-12",
        "end_date": "2025-04-13",
        "location": "Cupertino, California",
        "url": "https://dev.events/hackathons/NA/US/CA",
        "is_online": false,
        "is_california": true,
        "tags": ["Tech"]
    }
]"#;

pub struct DevEvents {
    transport: Transport,
    token: Option<String>,
}

impl DevEvents {
    pub fn new(transport: Transport, token: Option<String>) -> Self {
        Self { transport, token }
    }

    pub(crate) fn parse_document(&self, body: &str) -> Result<Vec<Event>> {
        let listings = base::parse_listings(body)?;
        Ok(base::build_events(SOURCE_NAME, listings, RegionalPolicy::FromFlag))
    }
}

impl EventSource for DevEvents {
    fn source_id(&self) -> &'static str {
        SOURCE_ID
    }

    fn source_name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn source_url(&self) -> &'static str {
        LISTING_URL
    }

    fn fetch(&self) -> Result<Vec<Event>> {
        let body = self
            .transport
            .load(URL, BUNDLED, Auth::bearer(self.token.as_deref()))?;
        self.parse_document(&body)
    }
}
