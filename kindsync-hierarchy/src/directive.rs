//! Extraction of parent references from artifact text.

use regex_lite::Regex;

use crate::{DirectiveMode, HierarchyConfig, HierarchyResult};

const ATTRIBUTE_PATTERN: &str = r#"(\S*)="([^"]*)""#;
const HEADER_END: &str = "%>";

/// Finds the parent reference in an artifact and normalizes it to an alias.
#[derive(Debug, Clone)]
pub struct DirectiveParser {
    mode: DirectiveMode,
    attribute_key: String,
    suffixes: Vec<String>,
    pattern: Regex,
}

impl DirectiveParser {
    pub fn new(config: &HierarchyConfig) -> HierarchyResult<Self> {
        let pattern = match config.mode {
            DirectiveMode::Attribute => Regex::new(ATTRIBUTE_PATTERN)?,
            DirectiveMode::Assignment => Regex::new(&format!(
                r#"{}\s*=\s*"([^"]*)""#,
                regex_lite::escape(&config.assignment_name)
            ))?,
        };
        Ok(Self {
            mode: config.mode,
            attribute_key: config.attribute_key.clone(),
            suffixes: config.suffixes.clone(),
            pattern,
        })
    }

    /// The raw directive value, before normalization.
    pub fn raw_reference<'t>(&self, text: &'t str) -> Option<&'t str> {
        match self.mode {
            DirectiveMode::Attribute => {
                let end = text.find(HEADER_END)? + HEADER_END.len();
                // last match wins
                self.pattern
                    .captures_iter(&text[..end])
                    .filter(|cap| {
                        cap.get(1)
                            .is_some_and(|name| name.as_str().eq_ignore_ascii_case(&self.attribute_key))
                    })
                    .filter_map(|cap| cap.get(2))
                    .last()
                    .map(|m| m.as_str())
            }
            DirectiveMode::Assignment => self
                .pattern
                .captures(text)
                .and_then(|cap| cap.get(1))
                .map(|m| m.as_str()),
        }
    }

    /// The parent alias named by `text`, if it carries a directive.
    ///
    /// The result may be empty (`masterPageFile=""`); callers treat that like
    /// no directive.
    pub fn parent_alias(&self, text: &str) -> Option<String> {
        self.raw_reference(text)
            .map(|raw| normalize_reference(raw, &self.suffixes))
    }
}

/// Strips a trailing known suffix (case-insensitive) and returns the last
/// non-empty `/`-separated segment: `"~/Sub/Page.master"` becomes `"Page"`.
pub fn normalize_reference(raw: &str, suffixes: &[String]) -> String {
    let mut value = raw.trim();
    for suffix in suffixes {
        if value.len() >= suffix.len() {
            let split = value.len() - suffix.len();
            if value.is_char_boundary(split) && value[split..].eq_ignore_ascii_case(suffix) {
                value = &value[..split];
            }
        }
    }
    value
        .split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffixes() -> Vec<String> {
        HierarchyConfig::default().suffixes
    }

    #[test]
    fn normalize_strips_suffix_and_path() {
        assert_eq!(normalize_reference("Sub/Page.master", &suffixes()), "Page");
        assert_eq!(normalize_reference("~/Views/Shared/_Layout.cshtml", &suffixes()), "_Layout");
        assert_eq!(normalize_reference("Page.MASTER", &suffixes()), "Page");
        assert_eq!(normalize_reference("Plain", &suffixes()), "Plain");
    }

    #[test]
    fn normalize_ignores_trailing_slashes() {
        assert_eq!(normalize_reference("Sub/Page/", &suffixes()), "Page");
        assert_eq!(normalize_reference("/", &suffixes()), "");
        assert_eq!(normalize_reference("", &suffixes()), "");
    }
}
