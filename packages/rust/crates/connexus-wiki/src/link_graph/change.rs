//! Rebuild decision for a single saved page.

use super::graph::LinkGraph;
use super::parser::extract_page;
use super::todos::TodoRegistry;
use serde::{Deserialize, Serialize};

/// Outcome of comparing a saved page against the current snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    /// Extracted link sequence differs from the recorded outgoing links.
    pub links_changed: bool,
    /// At least one todo content is not yet registered.
    pub todos_changed: bool,
}

impl ChangeReport {
    /// Whether a full rebuild is warranted.
    #[must_use]
    pub const fn requires_rebuild(self) -> bool {
        self.links_changed || self.todos_changed
    }
}

/// Compare freshly saved `content` for `topic` against `graph` and `registry`.
///
/// Links are compared as ordered sequences: a page whose text repeats a link
/// target differs from the deduplicated recorded set and counts as changed.
/// Todos only count as changed when new content appears; removed todos do not.
#[must_use]
pub fn detect_change(
    graph: &LinkGraph,
    registry: &TodoRegistry,
    topic: &str,
    content: &str,
    static_prefix: &str,
) -> ChangeReport {
    let page = extract_page(content, static_prefix);
    let links_changed = page.links != graph.outgoing(topic);
    let todos_changed = page
        .todos
        .iter()
        .any(|todo| !registry.contains_content(&todo.content));
    ChangeReport {
        links_changed,
        todos_changed,
    }
}
