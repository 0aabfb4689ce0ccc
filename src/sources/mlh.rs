use anyhow::Result;

use super::base::{self, Auth, RegionalPolicy, Transport};
use super::EventSource;
use crate::models::Event;

const URL: &str = "https://api.mlh.io/v1/events?season=2025";
const SOURCE_ID: &str = "mlh";
const SOURCE_NAME: &str = "MLH";
const LISTING_URL: &str = "https://mlh.io/seasons/2025/events";

const BUNDLED: &str = r#"[
    {
        "title": "Bit Hacks",
        "start_date": "2025-04-11",
        "end_date": "2025-04-13",
        "location": "Irvine, California",
        "url": "https://mlh.io/seasons/2025/events",
        "is_online": false,
        "is_california": true
    },
    {
        "title": "CruzHacks",
        "start_date": "2025-04-11",
        "end_date": "2025-04-13",
        "location": "Santa Cruz, California",
        "url": "https://mlh.io/seasons/2025/events",
        "is_online": false,
        "is_california": true
    },
    {
        "title": "AI Hackfest",
        "start_date": "2025-04-11",
        "end_date": "2025-04-13",
        "location": "Online",
        "url": "https://mlh.io/seasons/2025/events",
        "is_online": true,
        "tags": ["AI"]
    },
    {
        "title": "Global Hack Week: API",
        "start_date": "2025-04-11",
        "end_date": "2025-04-17",
        "location": "Online",
        "url": "https://mlh.io/seasons/2025/events",
        "is_online": true,
        "tags": ["API"]
    }
]"#;

pub struct Mlh {
    transport: Transport,
    token: Option<String>,
}

impl Mlh {
    pub fn new(transport: Transport, token: Option<String>) -> Self {
        Self { transport, token }
    }

    pub(crate) fn parse_document(&self, body: &str) -> Result<Vec<Event>> {
        let listings = base::parse_listings(body)?;
        Ok(base::build_events(SOURCE_NAME, listings, RegionalPolicy::FromFlag))
    }
}

impl EventSource for Mlh {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Mlh {
        Mlh::new(Transport::Bundled, None)
    }

    #[test]
    fn bundled_listings_keep_explicit_flags() {
        let events = source().fetch().expect("bundled mlh");
        assert_eq!(events.len(), 4);
        let regional = events
            .iter()
            .filter(|e| e.is_regional_priority)
            .map(|e| e.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(regional, vec!["Bit Hacks", "CruzHacks"]);
        assert!(events[0].prize.is_none());
    }

    #[test]
    fn flag_wins_over_location_text() {
        let events = source()
            .parse_document(
                r#"[{"title": "LA Hacks", "url": "https://mlh.example/la", "start_date": "2025-05-02", "location": "Los Angeles, California"}]"#,
            )
            .expect("parse mlh page");
        assert!(
            !events[0].is_regional_priority,
            "mlh only trusts its own flag"
        );
    }
}
