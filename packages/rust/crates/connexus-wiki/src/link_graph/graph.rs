//! Bidirectional adjacency over topic identifiers.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Source key -> ordered set of destinations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkMap(BTreeMap<String, BTreeSet<String>>);

impl LinkMap {
    /// Empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `from -> to`; returns `false` when the pair was already present.
    pub fn add(&mut self, from: &str, to: &str) -> bool {
        self.0
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string())
    }

    /// Whether `from -> to` is present.
    #[must_use]
    pub fn contains(&self, from: &str, to: &str) -> bool {
        self.0.get(from).is_some_and(|targets| targets.contains(to))
    }

    /// Source keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Sorted destinations of `from`; empty when unknown.
    #[must_use]
    pub fn links(&self, from: &str) -> Vec<String> {
        self.0
            .get(from)
            .map(|targets| targets.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// `(source, destination)` pairs in sorted order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().flat_map(|(from, targets)| {
            targets
                .iter()
                .map(move |to| (from.as_str(), to.as_str()))
        })
    }

    /// Number of source keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no source key is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of distinct pairs.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }
}

/// Transpose a forward map: every `x -> y` becomes `y -> x`.
#[must_use]
pub fn invert(forward: &LinkMap) -> LinkMap {
    let mut reverse = LinkMap::new();
    for (from, to) in forward.pairs() {
        reverse.add(to, from);
    }
    reverse
}

/// Forward links plus their exact transpose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkGraph {
    forward: LinkMap,
    reverse: LinkMap,
}

impl LinkGraph {
    /// Build a graph from a completed forward map; the reverse side is derived.
    #[must_use]
    pub fn from_forward(forward: LinkMap) -> Self {
        let reverse = invert(&forward);
        Self { forward, reverse }
    }

    /// Sorted targets referenced by `topic`.
    #[must_use]
    pub fn outgoing(&self, topic: &str) -> Vec<String> {
        self.forward.links(topic)
    }

    /// Sorted topics referencing `target`.
    #[must_use]
    pub fn incoming(&self, target: &str) -> Vec<String> {
        self.reverse.links(target)
    }

    /// Forward side.
    #[must_use]
    pub fn forward(&self) -> &LinkMap {
        &self.forward
    }

    /// Reverse side.
    #[must_use]
    pub fn reverse(&self) -> &LinkMap {
        &self.reverse
    }

    /// Distinct directed links.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.forward.edge_count()
    }
}
