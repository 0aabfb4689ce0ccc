pub mod archive;
pub mod listing;

use chrono::NaiveDate;

use crate::models::Event;
use crate::sources::SourceInfo;

pub use archive::{expired_events, render_archive};
pub use listing::render_listing;

pub const TABLE_START: &str =
    "<!-- Please leave a one line gap between this and the table TABLE_START (DO NOT CHANGE THIS LINE) -->";
pub const TABLE_END: &str =
    "<!-- Please leave a one line gap between this and the table TABLE_END (DO NOT CHANGE THIS LINE) -->";

const APPLY_BADGE: &str = "https://i.imgur.com/w6lyvuC.png";

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub region_label: String,
    pub today: NaiveDate,
    /// Listed under "Sources", in fetch order.
    pub sources: Vec<SourceInfo>,
}

/// Escapes text for use inside a markdown table cell.
pub fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

pub fn apply_link(url: &str) -> String {
    format!(
        "<a href=\"{url}\" target=\"_blank\"><img src=\"{APPLY_BADGE}\" width=\"84\" alt=\"Apply\"></a>"
    )
}

pub fn title_link(event: &Event) -> String {
    format!("**[{}]({})**", cell(&event.title), event.url)
}

/// Markdown table with a header row; an empty body becomes one placeholder row.
pub fn table(columns: &[&str], rows: &[String], placeholder: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("| {} |\n", columns.join(" | ")));
    let rule = columns
        .iter()
        .map(|c| "-".repeat(c.chars().count().max(3)))
        .collect::<Vec<_>>();
    out.push_str(&format!("| {} |\n", rule.join(" | ")));

    if rows.is_empty() {
        let padding = " |".repeat(columns.len().saturating_sub(1));
        out.push_str(&format!("| {placeholder} |{padding}\n"));
    } else {
        for row in rows {
            out.push_str(row);
            out.push('\n');
        }
    }
    out
}
