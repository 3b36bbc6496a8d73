//! Shared models for the wiki link graph and todo index.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority attached to a todo annotation.
///
/// Variant order matters: the derived ordering sorts every `Level` before
/// `Undefined`, regardless of the numeric level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "level")]
pub enum TodoPriority {
    /// Explicit numeric priority (`TODO2:`).
    Level(u32),
    /// No digits, or digits that do not fit an integer.
    Undefined,
}

impl TodoPriority {
    /// Parse the optional digit group captured after `TODO`.
    #[must_use]
    pub fn from_digits(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Undefined;
        }
        raw.parse::<u32>().map_or(Self::Undefined, Self::Level)
    }

    /// Numeric level, if any.
    #[must_use]
    pub const fn level(self) -> Option<u32> {
        match self {
            Self::Level(level) => Some(level),
            Self::Undefined => None,
        }
    }
}

impl fmt::Display for TodoPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(level) => write!(f, "{level}"),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

/// One action item extracted from document text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Todo {
    /// Parsed priority.
    pub priority: TodoPriority,
    /// Free text after the colon, untrimmed.
    pub content: String,
}

impl Todo {
    /// Create a todo.
    #[must_use]
    pub fn new(priority: TodoPriority, content: impl Into<String>) -> Self {
        Self {
            priority,
            content: content.into(),
        }
    }
}

/// A todo together with the topic it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedTodo {
    /// Owning topic.
    pub topic: String,
    /// Extracted todo.
    pub todo: Todo,
}

/// Links and presence of one topic, as consulted by a page view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicLinks {
    /// Queried topic.
    pub topic: String,
    /// Whether the underlying document exists.
    pub exists: bool,
    /// Targets referenced by this topic, sorted.
    pub outgoing: Vec<String>,
    /// Topics referencing this one, sorted.
    pub incoming: Vec<String>,
}

/// Summary counters of one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkGraphStats {
    /// Documents read by the scan.
    pub documents: usize,
    /// Topics with at least one outgoing link.
    pub forward_topics: usize,
    /// Targets with at least one incoming link.
    pub reverse_targets: usize,
    /// Distinct directed links.
    pub links: usize,
    /// Distinct todo entries in the registry.
    pub todos: usize,
    /// Snapshot version.
    pub version: u64,
}
