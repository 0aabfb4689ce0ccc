use crate::classify::{Bucket, Categorized};
use crate::models::Event;

use super::{apply_link, cell, table, title_link, RenderContext, TABLE_END, TABLE_START};

/// Full listing page; replaces whatever was there before.
pub fn render_listing(categorized: &Categorized, ctx: &RenderContext) -> String {
    let region = ctx.region_label.as_str();
    let mut out = String::new();

    out.push_str(&format!("# Hackathon Finder {}\n\n", ctx.today.format("%Y")));
    out.push_str(&format!(
        "A list of upcoming hackathons with priority for {region} and online events, \
         sorted by newest dates.\n\n"
    ));
    out.push_str(&format!(
        "🔍 **Priority Focus**: {region}-based and online hackathons  \n"
    ));
    out.push_str("📅 **Sorting**: Newest events first\n\n");
    out.push_str("## How to Use This Repository\n\n");
    out.push_str("- Browse the tables below to find hackathons that match your interests\n");
    out.push_str("- Click the \"Apply\" button to go directly to the application page\n");
    out.push_str("- Past events can be found in [ARCHIVE.md](./ARCHIVE.md)\n\n");
    out.push_str("---\n## The List 🧑‍💻\n\n");

    for bucket in Bucket::ALL {
        out.push_str(&section(bucket, categorized.bucket(bucket), region));
        out.push('\n');
    }

    if !ctx.sources.is_empty() {
        out.push_str("## Sources\n\n");
        for source in &ctx.sources {
            out.push_str(&format!("- [{}]({})\n", cell(&source.name), source.url));
        }
        out.push('\n');
    }
    out.push_str(&format!("---\n*Last updated: {}*\n", ctx.today.format("%Y-%m-%d")));
    out
}

fn section(bucket: Bucket, events: &[Event], region: &str) -> String {
    let (heading, locality, placeholder) = match bucket {
        Bucket::Regional => (
            format!("{region} Hackathons"),
            "Location",
            format!("No {region} hackathons found"),
        ),
        Bucket::Online => (
            "Online Hackathons".to_string(),
            "Platform",
            "No online hackathons found".to_string(),
        ),
        Bucket::Other => (
            "Other Hackathons".to_string(),
            "Location",
            "No other hackathons found".to_string(),
        ),
    };

    let rows = events
        .iter()
        .map(|event| row(bucket, event))
        .collect::<Vec<_>>();

    format!(
        "{TABLE_START}\n\n# {heading}\n{}\n{TABLE_END}\n",
        table(
            &["Hackathon", "Date", locality, "Application/Link"],
            &rows,
            &placeholder,
        )
    )
}

fn row(bucket: Bucket, event: &Event) -> String {
    let locality = match bucket {
        Bucket::Online => &event.source_name,
        Bucket::Regional | Bucket::Other => &event.location,
    };
    format!(
        "| {} | {} | {} | {} |",
        title_link(event),
        cell(&event.date_range()),
        cell(locality),
        apply_link(&event.url)
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::classify::categorize;
    use crate::models::sample_event;
    use crate::sources::SourceInfo;

    fn ctx() -> RenderContext {
        RenderContext {
            region_label: "California".to_string(),
            today: NaiveDate::from_ymd_opt(2025, 4, 20).expect("valid date"),
            sources: vec![
                SourceInfo {
                    id: "devpost".to_string(),
                    name: "Devpost".to_string(),
                    url: "https://devpost.com/hackathons".to_string(),
                },
                SourceInfo {
                    id: "luma".to_string(),
                    name: "Lu.ma".to_string(),
                    url: "https://lu.ma".to_string(),
                },
            ],
        }
    }

    fn rendered() -> String {
        let categorized = categorize(vec![
            Event {
                is_regional_priority: true,
                location: "Irvine, California".to_string(),
                end_date: Some("2025-04-13".to_string()),
                ..sample_event("Bit Hacks", "2025-04-11")
            },
            Event {
                is_online: true,
                source_name: "Devpost".to_string(),
                ..sample_event("Remote", "2025-04-09")
            },
        ]);
        render_listing(&categorized, &ctx())
    }

    #[test]
    fn rows_show_dates_locality_and_links() {
        let page = rendered();
        assert!(page.contains(
            "| **[Bit Hacks](https://example.com/bit-hacks)** | 2025-04-11 - 2025-04-13 | Irvine, California |"
        ));
        assert!(page.contains("| **[Remote](https://example.com/remote)** | 2025-04-09 | Devpost |"));
        assert!(page.contains("alt=\"Apply\""));
    }

    #[test]
    fn empty_other_bucket_renders_one_placeholder() {
        let page = rendered();
        assert_eq!(page.matches("| No other hackathons found | | | |").count(), 1);
        assert!(!page.contains("No online hackathons found"));
    }

    #[test]
    fn every_section_is_wrapped_in_markers() {
        let page = rendered();
        assert_eq!(page.matches(TABLE_START).count(), 3);
        assert_eq!(page.matches(TABLE_END).count(), 3);
        let regional = page.find("# California Hackathons").expect("regional heading");
        let online = page.find("# Online Hackathons").expect("online heading");
        let other = page.find("# Other Hackathons").expect("other heading");
        assert!(regional < online && online < other);
        assert!(page.ends_with("*Last updated: 2025-04-20*\n"));
    }

    #[test]
    fn empty_run_still_renders_all_tables() {
        let page = render_listing(&Categorized::default(), &ctx());
        assert!(page.contains("| No California hackathons found | | | |"));
        assert!(page.contains("| No online hackathons found | | | |"));
        assert!(page.contains("| No other hackathons found | | | |"));
    }

    #[test]
    fn sources_section_lists_what_was_queried() {
        let page = rendered();
        let section = &page[page.find("## Sources").expect("sources heading")..];
        let items = section
            .lines()
            .filter(|line| line.starts_with("- "))
            .collect::<Vec<_>>();
        assert_eq!(
            items,
            vec!["- [Devpost](https://devpost.com/hackathons)", "- [Lu.ma](https://lu.ma)"]
        );
    }

    #[test]
    fn no_sources_means_no_sources_heading() {
        let ctx = RenderContext {
            sources: Vec::new(),
            ..ctx()
        };
        let page = render_listing(&Categorized::default(), &ctx);
        assert!(!page.contains("## Sources"));
        assert!(page.ends_with("*Last updated: 2025-04-20*\n"));
    }
}
