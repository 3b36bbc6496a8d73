use regex::Regex;
use std::sync::LazyLock;

use super::compile_regex;

static MARKDOWN_LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"\[(.*?)\]\((.*?)\)"));

const EXTERNAL_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Whether a raw link target belongs in the internal graph.
///
/// Static assets and absolute web links are excluded.
#[must_use]
pub fn is_internal_target(target: &str, static_prefix: &str) -> bool {
    if !static_prefix.is_empty() && target.starts_with(static_prefix) {
        return false;
    }
    !EXTERNAL_SCHEMES
        .iter()
        .any(|scheme| target.starts_with(scheme))
}

/// Extract `[label](target)` targets, sorted lexicographically.
///
/// Labels are matched but discarded. Duplicates are kept; set semantics are
/// applied later when the graph is aggregated.
#[must_use]
pub fn extract_links(content: &str, static_prefix: &str) -> Vec<String> {
    let mut out: Vec<String> = MARKDOWN_LINK_REGEX
        .captures_iter(content)
        .filter_map(|caps| caps.get(2))
        .map(|target| target.as_str())
        .filter(|target| is_internal_target(target, static_prefix))
        .map(str::to_string)
        .collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::{extract_links, is_internal_target};

    #[test]
    fn shortest_match_splits_adjacent_links() {
        let links = extract_links("[a](x) and [b](y)", "/static");
        assert_eq!(links, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn links_do_not_span_lines() {
        assert!(extract_links("[a\n](x)", "/static").is_empty());
    }

    #[test]
    fn empty_static_prefix_filters_nothing_extra() {
        assert!(is_internal_target("/static/a.png", ""));
        assert!(!is_internal_target("https://example.com", ""));
    }
}
