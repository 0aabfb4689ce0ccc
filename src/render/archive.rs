use chrono::NaiveDate;

use crate::classify::Categorized;
use crate::models::{Event, SortKey};

use super::{cell, table, title_link};

/// Events whose last day is before `today`, newest first.
///
/// Undated events never count as expired.
pub fn expired_events(categorized: &Categorized, today: NaiveDate) -> Vec<&Event> {
    let mut expired = categorized
        .iter()
        .filter(|event| event.last_day().is_some_and(|day| day < today))
        .collect::<Vec<_>>();
    expired.sort_by(|a, b| SortKey::newest_first(&a.start_key(), &b.start_key()));
    expired
}

pub fn render_archive(categorized: &Categorized, today: NaiveDate) -> String {
    let rows = expired_events(categorized, today)
        .into_iter()
        .map(|event| {
            format!(
                "| {} | {} | {} | {} |",
                title_link(event),
                cell(&event.date_range()),
                cell(&event.location),
                cell(&event.source_name)
            )
        })
        .collect::<Vec<_>>();

    let mut out = String::new();
    out.push_str("# Archived Hackathons\n\n");
    out.push_str("This file contains past hackathons that are no longer active.\n\n");
    out.push_str("## Past Hackathons\n\n");
    out.push_str(&table(
        &["Hackathon", "Date", "Location", "Platform"],
        &rows,
        "No archived hackathons yet",
    ));
    out.push_str(&format!("\n*Last updated: {}*\n", today.format("%Y-%m-%d")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::categorize;
    use crate::models::sample_event;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn events() -> Categorized {
        categorize(vec![
            Event {
                end_date: Some("2025-05-20".to_string()),
                is_online: true,
                ..sample_event("Running", "2025-04-08")
            },
            sample_event("Finished", "2025-04-01"),
            Event {
                is_regional_priority: true,
                end_date: Some("2025-04-13".to_string()),
                ..sample_event("Ended", "2025-04-11")
            },
            sample_event("Undated", "TBD"),
        ])
    }

    #[test]
    fn only_past_events_are_archived() {
        let categorized = events();
        let titles = expired_events(&categorized, day(2025, 4, 20))
            .into_iter()
            .map(|e| e.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["Ended", "Finished"]);
    }

    #[test]
    fn event_ending_today_is_still_active() {
        assert!(expired_events(&events(), day(2025, 4, 13))
            .iter()
            .all(|e| e.title != "Ended"));
    }

    #[test]
    fn nothing_expired_renders_placeholder() {
        let page = render_archive(&events(), day(2025, 1, 1));
        assert_eq!(page.matches("| No archived hackathons yet | | | |").count(), 1);
        assert!(page.ends_with("*Last updated: 2025-01-01*\n"));
    }

    #[test]
    fn archive_rows_name_the_platform() {
        let page = render_archive(&events(), day(2025, 4, 20));
        assert!(page.contains(
            "| **[Ended](https://example.com/ended)** | 2025-04-11 - 2025-04-13 | Somewhere | Test |"
        ));
    }
}
