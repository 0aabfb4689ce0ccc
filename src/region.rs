use regex::{Regex, RegexBuilder};

use crate::config::RegionConfig;

/// Decides whether a free-text location falls inside the priority region.
#[derive(Debug, Clone)]
pub struct RegionMatcher {
    label: String,
    pattern: Option<Regex>,
}

impl RegionMatcher {
    pub fn new(region: &RegionConfig) -> Self {
        let names = std::iter::once(region.label.as_str())
            .chain(region.aliases.iter().map(String::as_str))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(regex::escape)
            .collect::<Vec<_>>();

        let pattern = if names.is_empty() {
            None
        } else {
            RegexBuilder::new(&format!(r"\b(?:{})\b", names.join("|")))
                .case_insensitive(true)
                .build()
                .ok()
        };

        Self {
            label: region.label.trim().to_string(),
            pattern,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matches(&self, location: &str) -> bool {
        self.pattern
            .as_ref()
            .map(|re| re.is_match(location))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn california() -> RegionMatcher {
        RegionMatcher::new(&RegionConfig::default())
    }

    #[test]
    fn matches_label_and_alias_on_word_boundaries() {
        let matcher = california();
        assert!(matcher.matches("Irvine, California"));
        assert!(matcher.matches("san francisco, ca"));
        assert!(!matcher.matches("Online"));
        assert!(!matcher.matches("Cancun, Mexico"), "alias must not match inside words");
    }

    #[test]
    fn empty_region_matches_nothing() {
        let matcher = RegionMatcher::new(&RegionConfig {
            label: " ".to_string(),
            aliases: Vec::new(),
        });
        assert!(!matcher.matches("Irvine, California"));
    }
}
