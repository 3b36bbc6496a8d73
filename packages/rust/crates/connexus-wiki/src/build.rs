//! Aggregation of scanned documents into one consistent snapshot.

use crate::link_graph::{
    ExtractedPage, LinkGraph, LinkGraphStats, LinkMap, TodoIndex, TodoRegistry, extract_page,
};
use crate::scanner::ScannedDocument;
use rayon::prelude::*;
use std::collections::BTreeSet;

/// One complete link graph + todo index pair produced by a single build pass.
///
/// Never mutated after construction; a rebuild produces a new value.
#[derive(Debug, Clone, Default)]
pub struct WikiSnapshot {
    version: u64,
    topics: BTreeSet<String>,
    graph: LinkGraph,
    todos: TodoRegistry,
    todo_index: TodoIndex,
}

impl WikiSnapshot {
    /// Monotonic version assigned by the publisher.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Topics read by the scan, sorted.
    #[must_use]
    pub fn topics(&self) -> &BTreeSet<String> {
        &self.topics
    }

    /// Link graph.
    #[must_use]
    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }

    /// Content-keyed todo registry.
    #[must_use]
    pub fn todos(&self) -> &TodoRegistry {
        &self.todos
    }

    /// Priority-grouped todo index.
    #[must_use]
    pub fn todo_index(&self) -> &TodoIndex {
        &self.todo_index
    }

    /// Sorted union of scanned topics and every outgoing link target.
    #[must_use]
    pub fn page_list(&self) -> Vec<String> {
        let mut names: BTreeSet<&str> = self.topics.iter().map(String::as_str).collect();
        names.extend(self.graph.forward().pairs().map(|(_, to)| to));
        names.into_iter().map(str::to_string).collect()
    }

    /// Summary counters.
    #[must_use]
    pub fn stats(&self) -> LinkGraphStats {
        LinkGraphStats {
            documents: self.topics.len(),
            forward_topics: self.graph.forward().len(),
            reverse_targets: self.graph.reverse().len(),
            links: self.graph.edge_count(),
            todos: self.todos.len(),
            version: self.version,
        }
    }
}

/// Build a snapshot from scanned documents.
///
/// Extraction runs in parallel; aggregation follows scan order, so the last
/// document in scan order wins todo content collisions.
#[must_use]
pub fn build_snapshot(
    documents: &[ScannedDocument],
    static_prefix: &str,
    version: u64,
) -> WikiSnapshot {
    let extracted: Vec<ExtractedPage> = documents
        .par_iter()
        .map(|doc| extract_page(&doc.content, static_prefix))
        .collect();

    let mut topics = BTreeSet::new();
    let mut forward = LinkMap::new();
    let mut todos = TodoRegistry::new();
    for (doc, page) in documents.iter().zip(extracted) {
        topics.insert(doc.topic.clone());
        for target in &page.links {
            forward.add(&doc.topic, target);
        }
        for todo in page.todos {
            todos.insert(&doc.topic, todo);
        }
    }

    let graph = LinkGraph::from_forward(forward);
    let todo_index = TodoIndex::from_registry(&todos);

    WikiSnapshot {
        version,
        topics,
        graph,
        todos,
        todo_index,
    }
}
