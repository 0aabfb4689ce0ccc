use anyhow::Result;

use super::base::{self, Auth, RegionalPolicy, Transport};
use super::EventSource;
use crate::models::Event;
use crate::region::RegionMatcher;

const URL: &str = "https://api.devpost.com/hackathons?filter=online&sort=newest";
const SOURCE_ID: &str = "devpost";
const SOURCE_NAME: &str = "Devpost";
const LISTING_URL: &str =
    "https://devpost.com/hackathons?challenge_type[]=online&order_by=recently-added";

// Devpost has no region flag; regional priority comes from the location text.
const BUNDLED: &str = r#"[
    {
        "title": "MAIS202 Final Projects: Winter 2025",
        "start_date": "2025-04-09",
        "end_date": "2025-04-10",
        "location": "Online",
        "url": "https://devpost.com/hackathons?challenge_type[]=online&order_by=recently-added",
        "is_online": true,
        "prize": "Non-cash prizes"
    },
    {
        "title": "Bitcoin 2025 Official Hackathon",
        "start_date": "2025-04-08",
        "end_date": "2025-05-20",
        "location": "Online",
        "url": "https://devpost.com/hackathons?challenge_type[]=online&order_by=recently-added",
        "is_online": true,
        "prize": "$32,000"
    },
    {
        "title": "Agentforce Virtual Hackathon",
        "start_date": "2025-03-05",
        "end_date": "2025-04-30",
        "location": "Online",
        "url": "https://devpost.com/hackathons?challenge_type[]=online&order_by=recently-added",
        "is_online": true,
        "prize": "$140,000",
        "tags": ["AI", "Machine Learning"]
    }
]"#;

pub struct Devpost {
    transport: Transport,
    token: Option<String>,
    matcher: RegionMatcher,
}

impl Devpost {
    pub fn new(transport: Transport, token: Option<String>, matcher: RegionMatcher) -> Self {
        Self {
            transport,
            token,
            matcher,
        }
    }

    pub(crate) fn parse_document(&self, body: &str) -> Result<Vec<Event>> {
        let listings = base::parse_listings(body)?;
        Ok(base::build_events(
            SOURCE_NAME,
            listings,
            RegionalPolicy::FromLocation(&self.matcher),
        ))
    }
}

impl EventSource for Devpost {
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
