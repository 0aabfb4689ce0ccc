use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub title: String,
    pub start_date: String, // YYYY-MM-DD, kept verbatim even when unparseable
    pub end_date: Option<String>,
    pub location: String,
    pub url: String,
    pub source_name: String,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub is_regional_priority: bool,
    #[serde(default)]
    pub prize: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Event {
    /// Rejects records whose identifying fields are blank.
    pub fn validate(self) -> Result<Self, RecordError> {
        if self.title.trim().is_empty() {
            return Err(RecordError::MissingField("title"));
        }
        if self.url.trim().is_empty() {
            return Err(RecordError::MissingField("url"));
        }
        if self.source_name.trim().is_empty() {
            return Err(RecordError::MissingField("source_name"));
        }
        Ok(self)
    }

    pub fn start_key(&self) -> SortKey {
        SortKey::parse(&self.start_date)
    }

    /// Last day the event runs, falling back to its start date.
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.end_date
            .as_deref()
            .and_then(parse_date)
            .or_else(|| parse_date(&self.start_date))
    }

    pub fn date_range(&self) -> String {
        match self.end_date.as_deref() {
            Some(end) if !end.trim().is_empty() => format!("{} - {}", self.start_date, end),
            _ => self.start_date.clone(),
        }
    }
}

/// Ordering key derived from a possibly invalid start date.
///
/// `Undated` compares below every real date, so a newest-first sort places
/// unparseable records after all dated ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Undated,
    Dated(NaiveDate),
}

impl SortKey {
    pub fn parse(text: &str) -> Self {
        match parse_date(text) {
            Some(date) => SortKey::Dated(date),
            None => SortKey::Undated,
        }
    }

    pub fn newest_first(a: &Self, b: &Self) -> Ordering {
        b.cmp(a)
    }
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
pub(crate) fn sample_event(title: &str, start_date: &str) -> Event {
    Event {
        title: title.to_string(),
        start_date: start_date.to_string(),
        end_date: None,
        location: "Somewhere".to_string(),
        url: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
        source_name: "Test".to_string(),
        is_online: false,
        is_regional_priority: false,
        prize: None,
        tags: Vec::new(),
    }
}
