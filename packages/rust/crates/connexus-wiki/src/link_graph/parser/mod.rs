//! Markdown page parsing for link-graph and todo indexing.

mod links;
mod todos;

use super::models::Todo;
use regex::Regex;

pub use self::links::{extract_links, is_internal_target};
pub use self::todos::extract_todos;

/// Default prefix of static asset links, which never enter the graph.
pub const DEFAULT_STATIC_PREFIX: &str = "/static";

pub(crate) fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(_compile_err) => match Regex::new(r"$^") {
            Ok(fallback) => fallback,
            Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
        },
    }
}

/// Outgoing link targets and todo annotations of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Internal link targets, sorted, duplicates retained.
    pub links: Vec<String>,
    /// Todos in document order.
    pub todos: Vec<Todo>,
}

/// Extract link targets and todos from raw page text.
///
/// Never fails: text that does not match either syntax is simply absent.
#[must_use]
pub fn extract_page(content: &str, static_prefix: &str) -> ExtractedPage {
    ExtractedPage {
        links: extract_links(content, static_prefix),
        todos: extract_todos(content),
    }
}
